// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成 CSV / XLSX 测试夹具、临时文件
// ==========================================
#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::PathBuf;
use tempfile::TempDir;
use trailer_recap::domain::UploadedFile;

/// 标准四列表头
pub const STANDARD_HEADERS: [&str; 4] = [
    "CUSTOM BLOCK",
    "FULL CASE CARTONS",
    "REPACK CARTONS",
    "STOCKING TIME (HRS)",
];

/// 夹具单元格
#[derive(Debug, Clone)]
pub enum Fx {
    Text(&'static str),
    Num(f64),
    Bool(bool),
    Empty,
}

/// 生成标准 CSV 内容
///
/// # 参数
/// - rows: (CUSTOM BLOCK, 整箱, 拆零箱, 工时)
/// - trailer_note: 写入附加 NOTE 列首行的文本（如 "Trailer#123"）
pub fn standard_csv(rows: &[(&str, f64, f64, f64)], trailer_note: Option<&str>) -> String {
    let mut csv = STANDARD_HEADERS.join(",");
    if trailer_note.is_some() {
        csv.push_str(",NOTE");
    }
    csv.push('\n');

    for (i, (block, full, repack, hours)) in rows.iter().enumerate() {
        csv.push_str(&format!("{},{},{},{}", block, full, repack, hours));
        if let Some(note) = trailer_note {
            csv.push(',');
            if i == 0 {
                csv.push_str(note);
            }
        }
        csv.push('\n');
    }
    csv
}

/// CSV 文本 → 上传文件
pub fn csv_upload(name: &str, content: &str) -> UploadedFile {
    UploadedFile::new(name, content.as_bytes().to_vec())
}

/// 生成 XLSX 字节（首个工作表，首行为表头）
pub fn xlsx_bytes(headers: &[&str], rows: &[Vec<Fx>]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write(0, col as u16, *header)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Fx::Text(s) => {
                    worksheet.write(r, c, *s)?;
                }
                Fx::Num(n) => {
                    worksheet.write(r, c, *n)?;
                }
                Fx::Bool(b) => {
                    worksheet.write(r, c, *b)?;
                }
                Fx::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// 在临时目录中写入文件
///
/// # 返回
/// - 文件路径（TempDir 需要保持存活）
pub fn write_temp_file(dir: &TempDir, name: &str, bytes: &[u8]) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
