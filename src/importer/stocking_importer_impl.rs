// ==========================================
// 卸柜补货汇总 - 补货明细导入器实现
// ==========================================
// 职责: 整合单文件导入流程
// 流程: 解析 → 拖车号识别 → 映射/数值化 → RDC/HDC 判定
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::{TrailerRecord, UploadRecord, UploadedFile, UNKNOWN_TRAILER};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::stocking_importer_trait::{FieldMapper, IngestedFile, StockingImporter};
use crate::importer::trailer_extractor::extract_trailer_name;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

// ==========================================
// StockingImporterImpl - 补货明细导入器实现
// ==========================================
pub struct StockingImporterImpl {
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,
}

impl StockingImporterImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - config: 列名配置读取器
    pub fn new(config: Arc<dyn ImportConfigReader>) -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper: Box::new(FieldMapperImpl::new(config)),
        }
    }
}

impl StockingImporter for StockingImporterImpl {
    #[instrument(skip(self, file), fields(file = %file.file_name))]
    fn import_file(&self, file: &UploadedFile) -> ImportResult<IngestedFile> {
        let start_time = Instant::now();

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let table = self.file_parser.parse(file)?;
        debug!(rows = table.row_count(), columns = table.column_count(), "文件解析完成");

        // === 步骤 2: 拖车号识别 ===
        let trailer_id = extract_trailer_name(&table);
        debug!(trailer = ?trailer_id, "拖车号识别完成");

        // === 步骤 3: 字段映射 ===
        let items = self.field_mapper.map_table(&file.file_name, &table);

        // === 步骤 4: RDC/HDC 判定（仅用本文件的拆零箱合计）===
        let trailer = trailer_id.map(|id| {
            let repack_total: f64 = items.iter().map(|i| i.repack_cartons).sum();
            TrailerRecord::new(id, repack_total, file.file_name.clone())
        });

        let upload = UploadRecord {
            file_name: file.file_name.clone(),
            trailer_label: trailer
                .as_ref()
                .map(TrailerRecord::label)
                .unwrap_or_else(|| UNKNOWN_TRAILER.to_string()),
            row_count: items.len(),
            uploaded_at: Utc::now(),
        };

        info!(
            rows = items.len(),
            trailer = %upload.trailer_label,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "文件导入完成"
        );

        Ok(IngestedFile {
            items,
            trailer,
            upload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::domain::DeliveryType;
    use crate::importer::error::ImportError;

    fn importer() -> StockingImporterImpl {
        StockingImporterImpl::new(Arc::new(ConfigManager::with_defaults()))
    }

    #[test]
    fn test_import_csv_with_trailer_rdc() {
        let csv = "CUSTOM BLOCK,FULL CASE CARTONS,REPACK CARTONS,STOCKING TIME (HRS),NOTE\n\
                   DOG FOOD,3,2,1.5,Trailer#123\n\
                   TOYS,1,3,0.5,\n";
        let file = UploadedFile::new("t1.csv", csv.as_bytes().to_vec());

        let ingested = importer().import_file(&file).unwrap();

        assert_eq!(ingested.items.len(), 2);
        let trailer = ingested.trailer.unwrap();
        assert_eq!(trailer.trailer_id, "Trailer#123");
        assert_eq!(trailer.delivery_type, DeliveryType::Rdc);
        assert_eq!(ingested.upload.trailer_label, "Trailer#123 (RDC)");
        assert_eq!(ingested.upload.row_count, 2);
    }

    #[test]
    fn test_import_csv_without_trailer() {
        let csv = "CUSTOM BLOCK,REPACK CARTONS\nDOG,0\n";
        let file = UploadedFile::new("t2.csv", csv.as_bytes().to_vec());

        let ingested = importer().import_file(&file).unwrap();

        assert!(ingested.trailer.is_none());
        assert_eq!(ingested.upload.trailer_label, UNKNOWN_TRAILER);
    }

    #[test]
    fn test_import_hdc_when_repack_not_numeric() {
        let csv = "CUSTOM BLOCK,REPACK CARTONS,NOTE\nDOG,n/a,Trailer #9\n";
        let file = UploadedFile::new("t3.csv", csv.as_bytes().to_vec());

        let ingested = importer().import_file(&file).unwrap();

        assert_eq!(ingested.upload.trailer_label, "Trailer #9 (HDC)");
    }

    #[test]
    fn test_import_unsupported_extension() {
        let file = UploadedFile::new("notes.pdf", b"%PDF".to_vec());
        let result = importer().import_file(&file);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
