// ==========================================
// 卸柜补货汇总 - 命令行主入口
// ==========================================

use clap::Parser;
use trailer_recap::cli::{run, Cli};
use trailer_recap::logging::{self, LogFormat};

fn main() {
    let cli = Cli::parse();

    // 初始化日志系统
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init_with(format, "warn");

    tracing::info!("{} v{}", trailer_recap::APP_NAME, trailer_recap::VERSION);

    if let Err(e) = run(cli) {
        tracing::error!("执行失败: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
