// ==========================================
// 产品补货看板 - 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库,翻译文件位于 locales/
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 已提供翻译的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 按配置设置语言，不支持的语言回退为默认语言
///
/// # 返回
/// - 实际生效的语言代码
pub fn apply_configured_locale(locale: &str) -> &'static str {
    let chosen = SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| l.eq_ignore_ascii_case(locale.trim()))
        .unwrap_or_else(|| {
            tracing::warn!(locale, "不支持的语言，回退为默认语言");
            DEFAULT_LOCALE
        });
    set_locale(chosen);
    chosen
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use reorder_dashboard::i18n::t;
/// let msg = t("report.none");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use reorder_dashboard::i18n::t_with_args;
/// let msg = t_with_args("report.count", &[("count", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
