// ==========================================
// 卸柜补货汇总 - 命令行
// ==========================================
// 职责: 解析参数 → 建会话 → 上传 → 调用对应 API → 输出
// 输出: 结果写 stdout；上传回执与日志写 stderr
// ==========================================

use crate::api::{ApiError, ApiResult, StockingApi};
use crate::app::AppState;
use crate::config::ConfigManager;
use crate::domain::{UploadOutcome, WorkingSession};
use crate::i18n::{self, t, t_with_args};
use crate::report::render_summary_text;
use anyhow::{anyhow, Context};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line interface for the trailer stocking recap
#[derive(Parser, Debug)]
#[command(
    name = "trailer-recap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Summarize trailer stocking spreadsheets by section: table, pie chart and recap email",
    long_about = None
)]
pub struct Cli {
    /// Path to a JSON config file (overrides TRAILER_RECAP_CONFIG)
    #[arg(global = true, long = "config")]
    pub config: Option<PathBuf>,

    /// Output language
    #[arg(
        global = true,
        long = "lang",
        value_parser = PossibleValuesParser::new(i18n::SUPPORTED_LOCALES)
    )]
    pub lang: Option<String>,

    /// Emit logs as JSON
    #[arg(global = true, long = "log-json")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input spreadsheets plus the sections to exclude
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV / XLSX files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Section to exclude (repeatable); Uncategorized is always excluded
    #[arg(long = "exclude", short = 'x')]
    pub exclude: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the per-section summary table
    Summary {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long = "json", help = "Print the summary as JSON")]
        json: bool,

        #[arg(long = "html", help = "Also write the summary page (table + chart) to this path")]
        html: Option<PathBuf>,
    },

    /// List the sections present after classification
    Sections {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show which custom blocks map to which section
    Mappings {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long = "html", help = "Write the mappings page to this path")]
        html: Option<PathBuf>,
    },

    /// Show the rows classified into one section
    Details {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long = "section", short = 's')]
        section: String,

        #[arg(long = "html", help = "Write the details page to this path")]
        html: Option<PathBuf>,
    },

    /// Compose the grouped recap email
    Email {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long = "out", short = 'o', help = "Write the email body to this path")]
        out: Option<PathBuf>,

        #[arg(long = "html", help = "Write the email page to this path")]
        html: Option<PathBuf>,
    },

    /// Render the workload pie chart as PNG
    Chart {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long = "out", short = 'o')]
        out: PathBuf,
    },

    /// Print a pre-filled email draft, or render a JSON draft
    EmailForm {
        /// Files used to pre-fill the draft
        files: Vec<PathBuf>,

        #[arg(long = "exclude", short = 'x')]
        exclude: Vec<String>,

        #[arg(long = "draft", help = "JSON draft to render instead of printing one")]
        draft: Option<PathBuf>,
    },
}

// ==========================================
// 入口
// ==========================================

pub fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(lang) = &cli.lang {
        i18n::set_locale(lang);
    }

    let config = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    let state = AppState::new(config);
    let session_id = state.open_session().map_err(user_error)?;

    let result = dispatch(&state, &session_id, cli.command);
    state.close_session(&session_id).map_err(user_error)?;
    result
}

fn dispatch(state: &AppState, session_id: &str, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Summary { input, json, html } => {
            in_session(state, session_id, |api, session| {
                upload(api, session, &input.files);
                let result = api.process(session, &input.exclude)?;
                if json {
                    println!("{}", to_pretty_json(&result)?);
                } else {
                    println!("{}\n", t("cli.summary_heading"));
                    print!("{}", render_summary_text(&result.summary));
                    println!("{}", trailer_line(&session.trailer_labels()));
                }
                if let Some(path) = &html {
                    let view = api.summary_view(session)?;
                    write_output(path, view.to_html().as_bytes())?;
                }
                Ok(())
            })
        }

        Commands::Sections { files } => {
            in_session(state, session_id, |api, session| {
                upload(api, session, &files);
                let form = api.exclusion_form(session)?;
                println!("{}", t("cli.sections_heading"));
                for section in &form.sections {
                    println!("  {}", section);
                }
                Ok(())
            })
        }

        Commands::Mappings { files, html } => {
            in_session(state, session_id, |api, session| {
                upload(api, session, &files);
                api.exclusion_form(session)?;
                let view = api.mappings(session)?;
                println!("{}", t("cli.mappings_heading"));
                for m in &view.mappings {
                    println!(
                        "  {} -> {} [{}] ({})",
                        m.custom_block.as_deref().unwrap_or("-"),
                        m.section,
                        m.matched_keyword.as_deref().unwrap_or("-"),
                        m.row_count
                    );
                }
                if let Some(path) = &html {
                    write_output(path, view.to_html().as_bytes())?;
                }
                Ok(())
            })
        }

        Commands::Details {
            files,
            section,
            html,
        } => {
            in_session(state, session_id, |api, session| {
                upload(api, session, &files);
                api.exclusion_form(session)?;
                let view = api.section_details(session, &section)?;
                println!(
                    "{}",
                    t_with_args(
                        "cli.details_heading",
                        &[("section", view.section.as_str()), ("count", view.rows.len().to_string().as_str())]
                    )
                );
                for row in &view.rows {
                    println!(
                        "  {}#{}  {}  {} / {} / {}",
                        row.source_file,
                        row.row_number,
                        row.custom_block.as_deref().unwrap_or("-"),
                        row.full_case_cartons,
                        row.repack_cartons,
                        row.stocking_hours
                    );
                }
                if let Some(path) = &html {
                    write_output(path, view.to_html().as_bytes())?;
                }
                Ok(())
            })
        }

        Commands::Email { input, out, html } => {
            in_session(state, session_id, |api, session| {
                upload(api, session, &input.files);
                api.process(session, &input.exclude)?;
                let email = api.generate_email(session)?;
                match &out {
                    Some(path) => write_output(path, email.body.as_bytes())?,
                    None => {
                        println!("{}\n", t_with_args("cli.subject", &[("subject", email.subject.as_str())]));
                        print!("{}", email.body);
                    }
                }
                if let Some(path) = &html {
                    write_output(path, email.to_html().as_bytes())?;
                }
                Ok(())
            })
        }

        Commands::Chart { input, out } => {
            in_session(state, session_id, |api, session| {
                upload(api, session, &input.files);
                api.process(session, &input.exclude)?;
                match api.generate_chart(session) {
                    Ok(png) => {
                        write_output(&out, &png)?;
                        eprintln!(
                            "{}",
                            t_with_args("cli.chart_written", &[("path", out.display().to_string().as_str())])
                        );
                    }
                    Err(ApiError::NotFound(_)) => eprintln!("{}", t("cli.no_chart")),
                    Err(e) => return Err(e),
                }
                Ok(())
            })
        }

        Commands::EmailForm {
            files,
            exclude,
            draft,
        } => {
            if let Some(path) = draft {
                let json = fs::read_to_string(&path)
                    .with_context(|| format!("读取草稿失败: {}", path.display()))?;
                let body = state
                    .stocking_api
                    .render_email_form(&json)
                    .map_err(user_error)?;
                print!("{}", body);
                return Ok(());
            }

            in_session(state, session_id, |api, session| {
                if !files.is_empty() {
                    upload(api, session, &files);
                    api.process(session, &exclude)?;
                }
                println!("{}", to_pretty_json(&api.email_form_draft(session))?);
                Ok(())
            })
        }
    }
}

// ==========================================
// 辅助函数
// ==========================================

// 上传回执按输入顺序写到 stderr
fn upload(api: &StockingApi, session: &mut WorkingSession, paths: &[PathBuf]) {
    let outcomes = api.upload_paths(session, paths);

    for outcome in &outcomes {
        match outcome {
            UploadOutcome::Accepted {
                file_name,
                row_count,
                trailer,
            } => eprintln!(
                "{}",
                t_with_args(
                    "cli.uploaded",
                    &[
                        ("file", file_name.as_str()),
                        ("rows", row_count.to_string().as_str()),
                        ("trailer", trailer.as_deref().unwrap_or(crate::domain::UNKNOWN_TRAILER)),
                    ]
                )
            ),
            UploadOutcome::Rejected { file_name, reason } => eprintln!(
                "{}",
                t_with_args("cli.rejected", &[("file", file_name.as_str()), ("reason", reason.as_str())])
            ),
        }
    }
}

fn in_session<F>(state: &AppState, session_id: &str, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&StockingApi, &mut WorkingSession) -> ApiResult<()>,
{
    state.with_session(session_id, f).map_err(user_error)
}

fn trailer_line(labels: &[String]) -> String {
    if labels.is_empty() {
        t("cli.no_trailers")
    } else {
        t_with_args("cli.trailers", &[("list", labels.join(", ").as_str())])
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> ApiResult<()> {
    fs::write(path, bytes)
        .map_err(|e| ApiError::InternalError(format!("写入 {} 失败: {}", path.display(), e)))?;
    eprintln!(
        "{}",
        t_with_args("cli.file_written", &[("path", path.display().to_string().as_str())])
    );
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InternalError(format!("序列化失败: {}", e)))
}

fn user_error(err: ApiError) -> anyhow::Error {
    anyhow!(err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_with_excludes() {
        let cli = Cli::try_parse_from([
            "trailer-recap",
            "--lang",
            "zh-CN",
            "summary",
            "a.csv",
            "b.xlsx",
            "-x",
            "Toys",
            "--exclude",
            "Pets",
        ])
        .unwrap();

        assert_eq!(cli.lang.as_deref(), Some("zh-CN"));
        match cli.command {
            Commands::Summary { input, json, html } => {
                assert_eq!(input.files.len(), 2);
                assert_eq!(input.exclude, vec!["Toys", "Pets"]);
                assert!(!json);
                assert!(html.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_lang() {
        let result = Cli::try_parse_from(["trailer-recap", "--lang", "fr", "sections", "a.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_requires_files() {
        assert!(Cli::try_parse_from(["trailer-recap", "summary"]).is_err());
    }

    #[test]
    fn test_parse_email_form_with_draft() {
        let cli =
            Cli::try_parse_from(["trailer-recap", "email-form", "--draft", "d.json"]).unwrap();
        match cli.command {
            Commands::EmailForm { files, draft, .. } => {
                assert!(files.is_empty());
                assert_eq!(draft, Some(PathBuf::from("d.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
