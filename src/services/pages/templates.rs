//! 嵌入的页面模板
//!
//! 模板在编译时从 templates/ 目录读取，`%KEY%` 占位符替换为转义后的值。

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "templates/"]
struct PageTemplates;

/// 转义 HTML 特殊字符
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 替换占位符，`raw` 中的值不转义
pub fn substitute(template: &str, values: &[(&str, &str)], raw: &[(&str, &str)]) -> String {
    let mut html = template.to_string();
    for (key, value) in values {
        html = html.replace(&format!("%{key}%"), &escape_html(value));
    }
    for (key, value) in raw {
        html = html.replace(&format!("%{key}%"), value);
    }
    html
}

/// 渲染模板，模板不存在时返回 None
pub fn render(name: &str, values: &[(&str, &str)], raw: &[(&str, &str)]) -> Option<String> {
    let file = PageTemplates::get(name)?;
    let template = String::from_utf8_lossy(&file.data);
    Some(substitute(&template, values, raw))
}
