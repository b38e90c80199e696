// ==========================================
// 卸柜补货汇总 - 补货汇总API
// ==========================================
// 职责: 每个路由对应一个操作，读写调用方传入的 WorkingSession
// 红线: API 不持有会话状态；空数据/无汇总返回 NoData/NoSummary
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::{
    LineItem, SummaryTable, TrailerRecord, UploadOutcome, UploadRecord, UploadedFile,
    WorkingSession, UNCATEGORIZED_SECTION,
};
use crate::engine::{SectionClassifier, SectionMapping, StockingAggregator};
use crate::importer::{StockingImporter, StockingImporterImpl, UniversalFileParser};
use crate::report::{self, page, ChartSlice, EmailDraft, PieChart, RecapEmail};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

// ==========================================
// 视图 DTO
// ==========================================

/// 首页
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub uploads: Vec<UploadRecord>,
    pub trailers: Vec<TrailerRecord>,
    pub row_count: usize,
    pub has_summary: bool,
}

impl DashboardView {
    pub fn to_html(&self) -> String {
        page::dashboard_page(&self.uploads, &self.trailers)
    }
}

/// 区段剔除表单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionFormView {
    /// 当前数据集中出现的区段（按名称排序）
    pub sections: Vec<String>,
    /// 关键字表中声明的全部区段（声明顺序）
    pub configured_sections: Vec<String>,
}

impl ExclusionFormView {
    pub fn to_html(&self) -> String {
        page::exclusion_form_page(&self.sections, &self.configured_sections)
    }
}

/// 处理结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResult {
    pub removed_rows: usize,
    pub remaining_rows: usize,
    /// 已舍入到 1 位小数
    pub summary: SummaryTable,
}

/// 饼图（内嵌）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartView {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub data_url: String,
    pub legend: Vec<ChartSlice>,
}

/// 汇总页
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryView {
    /// 已舍入到 1 位小数
    pub table: SummaryTable,
    pub trailers: Vec<TrailerRecord>,
    pub chart: Option<ChartView>,
    #[serde(skip)]
    pie: Option<PieChart>,
}

impl SummaryView {
    pub fn to_html(&self) -> String {
        let chart = self
            .pie
            .as_ref()
            .zip(self.chart.as_ref())
            .map(|(pie, view)| (pie, view.data_url.as_str()));
        page::summary_page(&self.table, &self.trailers, chart)
    }
}

/// 区段明细
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDetailsView {
    pub section: String,
    pub headers: Vec<String>,
    pub rows: Vec<LineItem>,
}

impl SectionDetailsView {
    pub fn to_html(&self) -> String {
        page::section_details_page(&self.section, &self.headers, &self.rows)
    }
}

/// 映射审计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingsView {
    pub mappings: Vec<SectionMapping>,
}

impl MappingsView {
    pub fn to_html(&self) -> String {
        page::mappings_page(&self.mappings)
    }
}

// ==========================================
// StockingApi - 补货汇总API
// ==========================================
pub struct StockingApi {
    config: Arc<ConfigManager>,
    importer: StockingImporterImpl,
    aggregator: StockingAggregator,
}

impl StockingApi {
    /// 创建API实例
    pub fn new(config: Arc<ConfigManager>) -> Self {
        let classifier = SectionClassifier::new(config.section_table());
        Self {
            importer: StockingImporterImpl::new(config.clone()),
            aggregator: StockingAggregator::new(classifier),
            config,
        }
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    // ==========================================
    // GET /
    // ==========================================

    pub fn dashboard(&self, session: &WorkingSession) -> DashboardView {
        DashboardView {
            uploads: session.uploads.clone(),
            trailers: session.trailers.clone(),
            row_count: session.dataset.len(),
            has_summary: session.summary.is_some(),
        }
    }

    // ==========================================
    // POST /upload
    // ==========================================

    /// 上传文件
    ///
    /// # 说明
    /// - 每个文件独立处理；失败的文件返回 Rejected，不影响其他文件
    /// - 有文件被接受时，旧汇总失效
    /// - 返回结果与输入顺序一致
    #[instrument(skip_all, fields(session = %session.id, files = files.len()))]
    pub fn upload_files(
        &self,
        session: &mut WorkingSession,
        files: Vec<UploadedFile>,
    ) -> Vec<UploadOutcome> {
        let outcomes: Vec<UploadOutcome> = files
            .into_iter()
            .map(|file| self.ingest_one(session, file))
            .collect();
        log_upload_done(session, &outcomes);
        outcomes
    }

    /// 从磁盘路径上传文件；读取失败的路径记为 Rejected，位置不变
    #[instrument(skip_all, fields(session = %session.id, files = paths.len()))]
    pub fn upload_paths<P: AsRef<Path>>(
        &self,
        session: &mut WorkingSession,
        paths: &[P],
    ) -> Vec<UploadOutcome> {
        let outcomes: Vec<UploadOutcome> = paths
            .iter()
            .map(|path| match UniversalFileParser::read_upload(path) {
                Ok(file) => self.ingest_one(session, file),
                Err(e) => {
                    warn!(path = %path.as_ref().display(), error = %e, "文件读取失败");
                    UploadOutcome::Rejected {
                        file_name: path.as_ref().display().to_string(),
                        reason: e.to_string(),
                    }
                }
            })
            .collect();
        log_upload_done(session, &outcomes);
        outcomes
    }

    // 导入单个文件并写入会话
    fn ingest_one(&self, session: &mut WorkingSession, file: UploadedFile) -> UploadOutcome {
        match self.importer.import_file(&file) {
            Ok(ingested) => {
                let row_count = ingested.items.len();
                let trailer = ingested.trailer.as_ref().map(TrailerRecord::label);

                session.dataset.append(ingested.items);
                if let Some(record) = ingested.trailer {
                    session.trailers.push(record);
                }
                session.uploads.push(ingested.upload);
                session.summary = None;

                UploadOutcome::Accepted {
                    file_name: file.file_name,
                    row_count,
                    trailer,
                }
            }
            Err(e) => {
                warn!(file = %file.file_name, error = %e, "文件被拒绝");
                UploadOutcome::Rejected {
                    file_name: file.file_name,
                    reason: e.to_string(),
                }
            }
        }
    }

    // ==========================================
    // GET /process
    // ==========================================

    /// 分类后列出当前出现的区段
    pub fn exclusion_form(&self, session: &mut WorkingSession) -> ApiResult<ExclusionFormView> {
        ensure_data(session)?;
        self.aggregator.classify(&mut session.dataset);

        Ok(ExclusionFormView {
            sections: session.dataset.distinct_sections(),
            configured_sections: self
                .config
                .section_table()
                .section_names()
                .map(str::to_string)
                .collect(),
        })
    }

    // ==========================================
    // POST /process, GET|POST /exclude_sections
    // ==========================================

    /// 分类 → 剔除 → 汇总，结果存入会话
    #[instrument(skip(self, session), fields(session = %session.id))]
    pub fn process(&self, session: &mut WorkingSession, excluded: &[String]) -> ApiResult<ProcessResult> {
        ensure_data(session)?;

        let before = session.dataset.len();
        let summary = self.aggregator.process(&mut session.dataset, excluded);
        let remaining = session.dataset.len();
        let rounded = summary.rounded();
        session.summary = Some(summary);

        Ok(ProcessResult {
            removed_rows: before - remaining,
            remaining_rows: remaining,
            summary: rounded,
        })
    }

    pub fn exclude_sections(
        &self,
        session: &mut WorkingSession,
        excluded: &[String],
    ) -> ApiResult<ProcessResult> {
        self.process(session, excluded)
    }

    // ==========================================
    // GET /summary
    // ==========================================

    pub fn summary_view(&self, session: &WorkingSession) -> ApiResult<SummaryView> {
        let summary = session.summary.as_ref().ok_or(ApiError::NoSummary)?;

        let pie = report::build_pie_chart(summary, self.config.chart(), &session.trailer_labels());
        let chart = match &pie {
            Some(pie) => {
                let png = pie.render_png()?;
                Some(ChartView {
                    title: pie.title.clone(),
                    width: pie.width,
                    height: pie.height,
                    data_url: report::to_data_url(&png),
                    legend: pie.slices.clone(),
                })
            }
            None => None,
        };

        Ok(SummaryView {
            table: summary.rounded(),
            trailers: session.trailers.clone(),
            chart,
            pie,
        })
    }

    // ==========================================
    // GET /generate_chart
    // ==========================================

    /// 饼图 PNG 字节
    pub fn generate_chart(&self, session: &WorkingSession) -> ApiResult<Vec<u8>> {
        let summary = session.summary.as_ref().ok_or(ApiError::NoSummary)?;
        let pie = report::build_pie_chart(summary, self.config.chart(), &session.trailer_labels())
            .ok_or_else(|| ApiError::NotFound("workload chart".to_string()))?;
        Ok(pie.render_png()?)
    }

    // ==========================================
    // GET /details/<section>
    // ==========================================

    pub fn section_details(
        &self,
        session: &WorkingSession,
        section: &str,
    ) -> ApiResult<SectionDetailsView> {
        ensure_data(session)?;
        if !session.dataset.is_classified() {
            return Err(ApiError::NotClassified);
        }
        let known = section == UNCATEGORIZED_SECTION
            || self.config.section_table().contains_section(section);
        if !known {
            return Err(ApiError::NotFound(format!("section {}", section)));
        }

        Ok(SectionDetailsView {
            section: section.to_string(),
            headers: session.dataset.headers(),
            rows: session.dataset.rows_in_section(section).cloned().collect(),
        })
    }

    // ==========================================
    // GET /mappings
    // ==========================================

    pub fn mappings(&self, session: &WorkingSession) -> ApiResult<MappingsView> {
        ensure_data(session)?;
        if !session.dataset.is_classified() {
            return Err(ApiError::NotClassified);
        }
        Ok(MappingsView {
            mappings: self.aggregator.mappings(&session.dataset),
        })
    }

    // ==========================================
    // GET /reset
    // ==========================================

    pub fn reset(&self, session: &mut WorkingSession) {
        session.reset();
        info!(session = %session.id, "会话已重置");
    }

    // ==========================================
    // GET /generate_email
    // ==========================================

    pub fn generate_email(&self, session: &WorkingSession) -> ApiResult<RecapEmail> {
        let summary = session.summary.as_ref().ok_or(ApiError::NoSummary)?;
        Ok(report::compose_recap_email(
            summary,
            self.config.email_groupings(),
            &session.trailers,
            Local::now().date_naive(),
        ))
    }

    // ==========================================
    // GET|POST /email_form
    // ==========================================

    /// 表单预填草稿；尚无汇总时为空草稿
    pub fn email_form_draft(&self, session: &WorkingSession) -> EmailDraft {
        match &session.summary {
            Some(summary) => EmailDraft::from_recap(summary, self.config.email_groupings()),
            None => EmailDraft::default(),
        }
    }

    /// 渲染用户提交的 JSON 草稿
    pub fn render_email_form(&self, draft_json: &str) -> ApiResult<String> {
        Ok(report::render_email_draft(draft_json)?)
    }
}

fn log_upload_done(session: &WorkingSession, outcomes: &[UploadOutcome]) {
    info!(
        accepted = outcomes.iter().filter(|o| o.is_accepted()).count(),
        total_rows = session.dataset.len(),
        "上传处理完成"
    );
}

fn ensure_data(session: &WorkingSession) -> ApiResult<()> {
    if session.dataset.is_empty() {
        return Err(ApiError::NoData);
    }
    Ok(())
}
