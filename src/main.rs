// ==========================================
// 产品补货看板 - 控制台入口
// ==========================================
// 每行输入一个动作,结果以 JSON 输出
// 动作: report | charts | download [path] | insert | query | scan <payload> | help | quit
// ==========================================

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use reorder_dashboard::app::{self, Session};
use reorder_dashboard::config::ConfigManager;
use reorder_dashboard::i18n::{apply_configured_locale, t, t_with_args};
use reorder_dashboard::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", reorder_dashboard::APP_NAME);
    tracing::info!("系统版本: {}", reorder_dashboard::VERSION);
    tracing::info!("==================================================");

    let manager = ConfigManager::load().context("加载配置失败")?;
    let config = manager.app_config().context("解析配置失败")?;
    apply_configured_locale(&config.locale);
    tracing::debug!(config = %manager.get_config_snapshot(), "生效配置");

    // 加载失败: 输出错误并停止,不进入动作循环
    let session = match app::open_session(config) {
        Ok(session) => session,
        Err(error_json) => {
            println!("{}", error_json);
            std::process::exit(1);
        }
    };

    print_result(app::page_load(&session));
    println!("{}", t("console.help"));

    run_console(&session)
}

fn run_console(session: &Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("读取输入失败")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (action, arg) = match line.split_once(char::is_whitespace) {
            Some((action, arg)) => (action, Some(arg.trim())),
            None => (line, None),
        };

        match action {
            "report" => print_result(app::page_load(session)),
            "charts" => print_result(app::dashboard_charts(session)),
            "download" => print_result(app::download_report(session, arg.map(Path::new))),
            "insert" => print_result(app::insert_report(session)),
            "query" => print_result(app::query_reorders(session)),
            "scan" => print_result(app::scan_lookup(session, arg.unwrap_or_default())),
            "help" => println!("{}", t("console.help")),
            "quit" | "exit" => break,
            other => println!("{}", t_with_args("console.unknown", &[("action", other)])),
        }
        stdout.flush().context("输出失败")?;
    }

    tracing::info!("会话结束");
    Ok(())
}

fn print_result(result: Result<String, String>) {
    match result {
        Ok(json) => println!("{}", json),
        Err(error_json) => eprintln!("{}", error_json),
    }
}
