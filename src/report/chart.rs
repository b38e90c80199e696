// ==========================================
// 卸柜补货汇总 - 工作量饼图
// ==========================================
// 职责: 区段工作量占比 → PNG 饼图
// 布局: 白底、居中圆盘、140° 起逆时针排布、黑色扇区边线
// 说明: 图中不绘制文字；标题（含拖车名）与图例由页面渲染
// ==========================================

use crate::config::ChartConfig;
use crate::domain::SummaryTable;
use crate::report::error::{ReportError, ReportResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::io::Cursor;

/// 首个扇区的起始角（度，数学坐标系，逆时针为正）
pub const START_ANGLE_DEG: f64 = 140.0;

// 扇区配色（与常见绘图库的默认 10 色循环一致）
const PALETTE: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const EDGE: Rgb<u8> = Rgb([0, 0, 0]);
const EDGE_WIDTH: f64 = 1.5;

// ==========================================
// ChartSlice - 扇区
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub section: String,
    /// 工作量占比（%，未舍入）
    pub workload_pct: f64,
    /// 归一化后的扇区占比（0..=1）
    pub fraction: f64,
    /// "#rrggbb"
    pub color: String,
}

impl ChartSlice {
    /// 解析 "#rrggbb"
    pub fn rgb(&self) -> ReportResult<Rgb<u8>> {
        let invalid = || ReportError::InvalidColor(self.color.clone());
        let hex = self.color.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

// ==========================================
// PieChart - 饼图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub width: u32,
    pub height: u32,
    /// 配置标题；有拖车时第二行为拖车名列表
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

/// 由汇总表构建饼图
///
/// # 参数
/// - trailers: 本会话的拖车展示名，追加在标题下一行
///
/// # 返回
/// - None: 没有占比 > 0 的区段（空汇总或工时全为 0）
pub fn build_pie_chart(
    summary: &SummaryTable,
    config: &ChartConfig,
    trailers: &[String],
) -> Option<PieChart> {
    let positive: Vec<(String, f64)> = summary
        .workload_slices()
        .into_iter()
        .filter(|(_, pct)| *pct > 0.0 && pct.is_finite())
        .collect();

    let sum: f64 = positive.iter().map(|(_, pct)| pct).sum();
    if positive.is_empty() || sum <= 0.0 {
        return None;
    }

    let slices = positive
        .into_iter()
        .enumerate()
        .map(|(i, (section, pct))| {
            let rgb = PALETTE[i % PALETTE.len()];
            ChartSlice {
                section,
                workload_pct: pct,
                fraction: pct / sum,
                color: format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]),
            }
        })
        .collect();

    let mut title = config.title.clone();
    if !trailers.is_empty() {
        title.push('\n');
        title.push_str(&trailers.join(", "));
    }

    Some(PieChart {
        width: config.width,
        height: config.height,
        title,
        slices,
    })
}

impl PieChart {
    /// 图例: (区段, 颜色, 占比)
    pub fn legend(&self) -> Vec<(&str, &str, f64)> {
        self.slices
            .iter()
            .map(|s| (s.section.as_str(), s.color.as_str(), s.workload_pct))
            .collect()
    }

    // 各扇区的累计结束角（相对起始角，度）
    fn slice_ends(&self) -> Vec<f64> {
        let mut acc = 0.0;
        self.slices
            .iter()
            .map(|s| {
                acc += s.fraction * 360.0;
                acc
            })
            .collect()
    }

    /// 栅格化
    pub fn rasterize(&self) -> ReportResult<RgbImage> {
        if self.width == 0 || self.height == 0 {
            return Err(ReportError::InvalidChartSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.slices.is_empty() {
            return Err(ReportError::EmptyChart);
        }
        let colors = self
            .slices
            .iter()
            .map(ChartSlice::rgb)
            .collect::<ReportResult<Vec<_>>>()?;
        let last = colors.len() - 1;

        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;
        let radius = 0.4 * self.width.min(self.height) as f64;
        let ends = self.slice_ends();
        // 分界线（相对角）；只有一个扇区时不画
        let boundaries: Vec<f64> = if self.slices.len() > 1 {
            std::iter::once(0.0)
                .chain(ends.iter().take(ends.len() - 1).copied())
                .collect()
        } else {
            Vec::new()
        };

        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let dx = x as f64 + 0.5 - cx;
            // 图像 y 轴向下，翻转为数学坐标
            let dy = cy - (y as f64 + 0.5);
            let r = (dx * dx + dy * dy).sqrt();
            if r > radius {
                continue;
            }

            let angle = dy.atan2(dx).to_degrees();
            let rel = (angle - START_ANGLE_DEG).rem_euclid(360.0);

            let on_rim = radius - r < EDGE_WIDTH;
            let on_boundary = boundaries
                .iter()
                .any(|b| distance_to_ray(r, rel, *b) < EDGE_WIDTH / 2.0 + 0.25);

            *pixel = if on_rim || on_boundary {
                EDGE
            } else {
                let idx = ends.iter().position(|end| rel < *end).unwrap_or(last);
                colors[idx]
            };
        }

        Ok(img)
    }

    /// PNG 字节
    pub fn render_png(&self) -> ReportResult<Vec<u8>> {
        let img = self.rasterize()?;
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

// 极坐标点到分界射线的距离（射线只向外延伸）
fn distance_to_ray(r: f64, angle_deg: f64, ray_deg: f64) -> f64 {
    let mut delta = (angle_deg - ray_deg).rem_euclid(360.0);
    if delta > 180.0 {
        delta = 360.0 - delta;
    }
    if delta >= 90.0 {
        return r;
    }
    r * (delta * PI / 180.0).sin()
}

/// PNG → data URL（内嵌 <img>）
pub fn to_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SummaryRow, TOTAL_ROW, UNCATEGORIZED_SECTION};

    fn row(section: &str, pct: Option<f64>) -> SummaryRow {
        SummaryRow {
            section: section.to_string(),
            full_case_cartons: 0.0,
            repack_cartons: 0.0,
            stocking_hours: pct.unwrap_or(0.0),
            workload_pct: pct,
        }
    }

    fn summary(rows: Vec<SummaryRow>) -> SummaryTable {
        SummaryTable {
            sections: rows,
            total: row(TOTAL_ROW, None),
        }
    }

    fn small_config() -> ChartConfig {
        ChartConfig {
            width: 200,
            height: 200,
            ..ChartConfig::default()
        }
    }

    fn point_at(chart: &PieChart, angle_deg: f64, r_factor: f64) -> (u32, u32) {
        let radius = 0.4 * chart.width.min(chart.height) as f64;
        let a = angle_deg.to_radians();
        let x = chart.width as f64 / 2.0 + a.cos() * radius * r_factor;
        let y = chart.height as f64 / 2.0 - a.sin() * radius * r_factor;
        (x as u32, y as u32)
    }

    #[test]
    fn test_build_excludes_total_and_uncategorized() {
        let s = summary(vec![
            row("Pets", Some(60.0)),
            row(UNCATEGORIZED_SECTION, Some(40.0)),
        ]);
        let chart = build_pie_chart(&s, &small_config(), &[]).unwrap();

        assert_eq!(chart.slices.len(), 1);
        assert_eq!(chart.slices[0].section, "Pets");
        assert_eq!(chart.slices[0].fraction, 1.0);
        assert_eq!(chart.slices[0].color, "#1f77b4");
    }

    #[test]
    fn test_build_none_when_no_positive_slices() {
        assert!(build_pie_chart(&summary(Vec::new()), &small_config(), &[]).is_none());
        let zero = summary(vec![row("Pets", Some(0.0)), row("Toys", Some(0.0))]);
        assert!(build_pie_chart(&zero, &small_config(), &[]).is_none());
    }

    #[test]
    fn test_render_png_dimensions_and_colors() {
        let s = summary(vec![row("Pets", Some(50.0)), row("Toys", Some(50.0))]);
        let chart = build_pie_chart(&s, &small_config(), &[]).unwrap();

        let png = chart.render_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (200, 200));

        // 角落是背景
        assert_eq!(*decoded.get_pixel(0, 0), BACKGROUND);

        // 第一个扇区: 140° → 320°，中线 230°
        let (x, y) = point_at(&chart, 230.0, 0.5);
        assert_eq!(decoded.get_pixel(x, y).0, PALETTE[0]);

        // 第二个扇区: 320° → 500°，中线 50°
        let (x, y) = point_at(&chart, 50.0, 0.5);
        assert_eq!(decoded.get_pixel(x, y).0, PALETTE[1]);

        // 外圈边线
        let (x, y) = point_at(&chart, 0.0, 0.995);
        assert_eq!(*decoded.get_pixel(x, y), EDGE);
    }

    #[test]
    fn test_zero_size_rejected() {
        let s = summary(vec![row("Pets", Some(100.0))]);
        let mut chart = build_pie_chart(&s, &small_config(), &[]).unwrap();
        chart.width = 0;
        assert!(matches!(chart.render_png(), Err(ReportError::InvalidChartSize { .. })));
    }

    #[test]
    fn test_title_lists_trailers() {
        let s = summary(vec![row("Pets", Some(100.0))]);
        let trailers = vec!["Trailer#9 (RDC)".to_string(), "Unknown Trailer".to_string()];

        let chart = build_pie_chart(&s, &small_config(), &trailers).unwrap();
        assert_eq!(
            chart.title,
            format!("{}\nTrailer#9 (RDC), Unknown Trailer", small_config().title)
        );

        let plain = build_pie_chart(&s, &small_config(), &[]).unwrap();
        assert_eq!(plain.title, small_config().title);
    }

    #[test]
    fn test_empty_chart_rejected() {
        let chart = PieChart {
            width: 200,
            height: 200,
            title: String::new(),
            slices: Vec::new(),
        };
        assert!(matches!(chart.render_png(), Err(ReportError::EmptyChart)));
    }

    #[test]
    fn test_deserialized_chart_keeps_colors() {
        let s = summary(vec![row("Pets", Some(50.0)), row("Toys", Some(50.0))]);
        let json = serde_json::to_string(&build_pie_chart(&s, &small_config(), &[]).unwrap()).unwrap();
        let chart: PieChart = serde_json::from_str(&json).unwrap();

        let decoded = image::load_from_memory(&chart.render_png().unwrap())
            .unwrap()
            .to_rgb8();
        let (x, y) = point_at(&chart, 50.0, 0.5);
        assert_eq!(decoded.get_pixel(x, y).0, PALETTE[1]);
    }

    #[test]
    fn test_bad_slice_color_rejected() {
        let s = summary(vec![row("Pets", Some(100.0))]);
        let mut chart = build_pie_chart(&s, &small_config(), &[]).unwrap();
        chart.slices[0].color = "blue".to_string();
        assert!(matches!(chart.render_png(), Err(ReportError::InvalidColor(_))));
    }

    #[test]
    fn test_data_url_prefix() {
        let url = to_data_url(&[0x89, b'P', b'N', b'G']);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }
}
