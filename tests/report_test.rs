// ==========================================
// 报表输出 集成测试
// ==========================================
// 测试目标: 汇总页 HTML、饼图 PNG、明细/映射页
// ==========================================

mod test_helpers;

use std::sync::Arc;
use test_helpers::{csv_upload, standard_csv};
use trailer_recap::config::ConfigManager;
use trailer_recap::domain::WorkingSession;
use trailer_recap::report::render_summary_text;
use trailer_recap::StockingApi;

fn processed_session(api: &StockingApi) -> WorkingSession {
    let mut session = WorkingSession::new("report");
    let csv = standard_csv(
        &[
            ("DOG FOOD", 3.0, 0.0, 3.0),
            ("<b>TOYS</b>", 1.0, 2.0, 1.0),
            ("KITCHEN", 2.0, 0.0, 0.0),
        ],
        Some("Trailer#9"),
    );
    let outcomes = api.upload_files(&mut session, vec![csv_upload("t.csv", &csv)]);
    assert!(outcomes[0].is_accepted());
    api.process(&mut session, &[]).unwrap();
    session
}

#[test]
fn test_summary_page_html() {
    let api = StockingApi::new(Arc::new(ConfigManager::with_defaults()));
    let session = processed_session(&api);

    let html = api.summary_view(&session).unwrap().to_html();

    assert!(html.contains("<table class=\"table\">"));
    assert!(html.contains("<tr class=\"total\">"));
    assert!(html.contains("Trailer#9 (RDC)"));
    assert!(html.contains("75.0"));
    assert!(html.contains("25.0"));
    assert!(html.contains("data:image/png;base64,"));

    // 饼图标题第二行列出拖车
    let title = api.summary_view(&session).unwrap().chart.unwrap().title;
    assert!(title.ends_with("\nTrailer#9 (RDC)"));
    assert!(html.contains("<br>Trailer#9 (RDC)</h2>"));
}

#[test]
fn test_chart_png_decodes_and_skips_zero_slices() {
    let api = StockingApi::new(Arc::new(ConfigManager::with_defaults()));
    let session = processed_session(&api);

    let view = api.summary_view(&session).unwrap();
    let legend: Vec<&str> = view
        .chart
        .as_ref()
        .unwrap()
        .legend
        .iter()
        .map(|s| s.section.as_str())
        .collect();
    // Kitchen 工时为 0，不出现在饼图中
    assert_eq!(legend, vec!["Pets", "Toys"]);

    let png = api.generate_chart(&session).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (800, 800));
}

#[test]
fn test_details_page_escapes_cells() {
    let api = StockingApi::new(Arc::new(ConfigManager::with_defaults()));
    let session = processed_session(&api);

    let html = api.section_details(&session, "Toys").unwrap().to_html();
    assert!(html.contains("&lt;b&gt;TOYS&lt;/b&gt;"));
    assert!(!html.contains("<b>TOYS</b>"));

    let mappings = api.mappings(&session).unwrap().to_html();
    assert!(mappings.contains("DOG FOOD"));
    assert!(mappings.contains("Pets"));
}

#[test]
fn test_text_table_lists_every_row() {
    let api = StockingApi::new(Arc::new(ConfigManager::with_defaults()));
    let session = processed_session(&api);

    let text = render_summary_text(&api.summary_view(&session).unwrap().table);
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].contains("Section"));
    assert!(text.contains("Kitchen"));
    assert!(lines.iter().any(|l| l.starts_with("Total")));
}
