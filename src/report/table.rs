// ==========================================
// 卸柜补货汇总 - 汇总表渲染
// ==========================================
// 输出: HTML 表格（class="table"）与终端文本表格
// 数值统一舍入到 1 位小数；单元格文本一律转义
// ==========================================

use crate::domain::{round1, SummaryTable};
use std::fmt::Write as _;

pub const SUMMARY_HEADERS: [&str; 5] = [
    "Section",
    "FULL CASE CARTONS",
    "REPACK CARTONS",
    "STOCKING TIME (HRS)",
    "Workload %",
];

/// HTML 转义
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 1 位小数
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", round1(value))
}

fn pct_cell(pct: Option<f64>) -> String {
    pct.map(format_one_decimal).unwrap_or_default()
}

/// 汇总表 → HTML
pub fn render_summary_html(summary: &SummaryTable) -> String {
    let mut html = String::from("<table class=\"table\">\n<thead>\n<tr>");
    for header in SUMMARY_HEADERS {
        let _ = write!(html, "<th>{}</th>", html_escape(header));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in summary.rows() {
        let class = if row.is_total() { " class=\"total\"" } else { "" };
        let _ = writeln!(
            html,
            "<tr{}><th>{}</th><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            class,
            html_escape(&row.section),
            format_one_decimal(row.full_case_cartons),
            format_one_decimal(row.repack_cartons),
            format_one_decimal(row.stocking_hours),
            pct_cell(row.workload_pct),
        );
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// 汇总表 → 等宽文本（CLI 输出）
pub fn render_summary_text(summary: &SummaryTable) -> String {
    let rows: Vec<[String; 5]> = summary
        .rows()
        .map(|row| {
            [
                row.section.clone(),
                format_one_decimal(row.full_case_cartons),
                format_one_decimal(row.repack_cartons),
                format_one_decimal(row.stocking_hours),
                pct_cell(row.workload_pct),
            ]
        })
        .collect();

    let mut widths = SUMMARY_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = SUMMARY_HEADERS.iter().map(|h| h.to_string()).collect();
    push_text_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_text_line(&mut out, &rule, &widths);
    for row in &rows {
        push_text_line(&mut out, row, &widths);
    }
    out
}

fn push_text_line(out: &mut String, cells: &[String], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, width))| {
            // 区段名左对齐，数值右对齐
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
