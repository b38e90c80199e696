// ==========================================
// 卸柜补货汇总 - HTML 页面
// ==========================================
// 职责: 各路由对应的自包含 HTML 页面
// 红线: 所有动态文本必须经 html_escape
// ==========================================

use crate::domain::{LineItem, SummaryTable, TrailerRecord, UploadRecord};
use crate::engine::SectionMapping;
use crate::report::chart::PieChart;
use crate::report::table::{format_one_decimal, html_escape, render_summary_html};
use std::fmt::Write as _;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = html_escape(title),
        body = body,
    )
}

fn list(items: impl IntoIterator<Item = String>) -> String {
    let mut html = String::from("<ul>\n");
    for item in items {
        let _ = writeln!(html, "<li>{}</li>", html_escape(&item));
    }
    html.push_str("</ul>");
    html
}

/// 首页: 上传记录 + 拖车列表
pub fn dashboard_page(uploads: &[UploadRecord], trailers: &[TrailerRecord]) -> String {
    let mut body = String::from(
        "<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"files\" multiple accept=\".csv,.xlsx,.xls\">\n\
         <button type=\"submit\">Upload</button>\n</form>\n",
    );

    body.push_str("<h2>Uploaded files</h2>\n");
    body.push_str(&list(
        uploads
            .iter()
            .map(|u| format!("{}: {} ({} rows)", u.file_name, u.trailer_label, u.row_count)),
    ));

    body.push_str("\n<h2>Trailers</h2>\n");
    body.push_str(&list(trailers.iter().map(TrailerRecord::label)));

    body.push_str(
        "\n<p><a href=\"/process\">Process</a> | <a href=\"/summary\">Summary</a> | \
         <a href=\"/mappings\">Mappings</a> | <a href=\"/generate_email\">Email</a> | \
         <a href=\"/reset\">Reset</a></p>",
    );
    layout("Trailer Stocking Recap", &body)
}

/// 区段剔除表单
///
/// # 参数
/// - sections: 数据中出现的区段（可勾选）
/// - configured_sections: 关键字表中的全部区段；未出现的只列出名称
pub fn exclusion_form_page(sections: &[String], configured_sections: &[String]) -> String {
    let mut body = String::from("<form action=\"/process\" method=\"post\">\n");
    for section in sections {
        let escaped = html_escape(section);
        let _ = writeln!(
            body,
            "<label><input type=\"checkbox\" name=\"exclude_sections\" value=\"{0}\"> {0}</label><br>",
            escaped
        );
    }
    body.push_str("<button type=\"submit\">Process</button>\n</form>");

    let absent: Vec<&str> = configured_sections
        .iter()
        .filter(|s| !sections.contains(*s))
        .map(String::as_str)
        .collect();
    if !absent.is_empty() {
        let _ = write!(
            body,
            "\n<p>Not in this upload: {}</p>",
            html_escape(&absent.join(", "))
        );
    }
    layout("Exclude Sections", &body)
}

/// 汇总页: 表格 + 拖车 + 饼图（有则内嵌）
pub fn summary_page(
    summary: &SummaryTable,
    trailers: &[TrailerRecord],
    chart: Option<(&PieChart, &str)>,
) -> String {
    let mut body = render_summary_html(summary);

    if !trailers.is_empty() {
        let labels: Vec<String> = trailers.iter().map(TrailerRecord::label).collect();
        let _ = write!(body, "\n<p>Trailers: {}</p>", html_escape(&labels.join(", ")));
    }

    if let Some((chart, data_url)) = chart {
        let _ = write!(
            body,
            "\n<h2>{}</h2>\n<img src=\"{}\" width=\"{}\" height=\"{}\" alt=\"workload chart\">\n<ul>\n",
            html_escape(&chart.title).replace('\n', "<br>"),
            html_escape(data_url),
            chart.width,
            chart.height,
        );
        for (section, color, pct) in chart.legend() {
            let _ = writeln!(
                body,
                "<li><span style=\"color:{}\">&#9632;</span> {} {}%</li>",
                html_escape(color),
                html_escape(section),
                format_one_decimal(pct),
            );
        }
        body.push_str("</ul>");
    }

    layout("Summary", &body)
}

/// 区段明细页
pub fn section_details_page(section: &str, headers: &[String], rows: &[LineItem]) -> String {
    let mut body = String::from("<table class=\"table\">\n<tr>");
    for header in headers {
        let _ = write!(body, "<th>{}</th>", html_escape(header));
    }
    body.push_str("</tr>\n");

    for row in rows {
        body.push_str("<tr>");
        for header in headers {
            let cell = row
                .raw
                .iter()
                .find(|(h, _)| h == header)
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();
            let _ = write!(body, "<td>{}</td>", html_escape(&cell));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>");

    layout(&format!("Section: {}", section), &body)
}

/// 标签 → 区段映射页
pub fn mappings_page(mappings: &[SectionMapping]) -> String {
    let mut body = String::from(
        "<table class=\"table\">\n<tr><th>CUSTOM BLOCK</th><th>Section</th><th>Keyword</th><th>Rows</th></tr>\n",
    );
    for mapping in mappings {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            html_escape(mapping.custom_block.as_deref().unwrap_or("")),
            html_escape(&mapping.section),
            html_escape(mapping.matched_keyword.as_deref().unwrap_or("")),
            mapping.row_count,
        );
    }
    body.push_str("</table>");
    layout("Mappings", &body)
}

/// 邮件页（正文放在 <pre> 中原样展示）
pub fn email_page(subject: &str, body_text: &str) -> String {
    let body = format!(
        "<h2>{}</h2>\n<pre>{}</pre>",
        html_escape(subject),
        html_escape(body_text)
    );
    layout("Recap Email", &body)
}
