use crate::types::FontSize;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub root_class: &'static str,
}

pub fn theme_definition(dark_mode: bool) -> ThemeDefinition {
    if dark_mode {
        ThemeDefinition {
            css: DARK_THEME,
            root_class: "app dark-theme",
        }
    } else {
        ThemeDefinition {
            css: LIGHT_THEME,
            root_class: "app",
        }
    }
}

/// Root font size in pixels for a font-size preference.
pub fn root_font_px(size: FontSize) -> i32 {
    match size {
        FontSize::Small => 14,
        FontSize::Medium => 16,
        FontSize::Large => 18,
    }
}

pub const BASE_CSS: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
.chat-widget { max-width: 48rem; margin: 0 auto; display: flex; flex-direction: column; height: 100vh; }
.chat-header { display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 1rem; background: var(--color-header-bg); color: var(--color-header-text); position: relative; z-index: 35; }
.header-actions { display: flex; gap: 0.5rem; align-items: center; }
.status-indicator { width: 0.6rem; height: 0.6rem; border-radius: 50%; background: var(--color-status-off); }
.status-indicator.connected { background: var(--color-status-on); }
.chat-body { flex: 1; display: flex; flex-direction: column; overflow: hidden; }
.chat-messages { flex: 1; overflow-y: auto; padding: 1rem; }
.message { display: flex; margin-bottom: 0.75rem; }
.message.user { justify-content: flex-end; }
.message-bubble { max-width: 80%; padding: 0.6rem 0.9rem; border-radius: 0.75rem; }
.message-bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); }
.message-bubble.assistant { background: var(--color-chat-assistant-bg); color: var(--color-chat-assistant-text); }
.message-bubble.error { border: 1px solid var(--color-error); }
.message-time, .source-score, .source-portfolio { font-size: 0.75rem; color: var(--color-text-muted); }
.message-sources { margin-top: 0.5rem; border-top: 1px solid var(--color-border); padding-top: 0.5rem; }
.error-message { background: var(--color-error-bg); color: var(--color-error); padding: 0.75rem; border-radius: 0.5rem; margin-bottom: 1rem; }
.typing-indicator { display: flex; gap: 0.25rem; }
.typing-dot { width: 0.4rem; height: 0.4rem; border-radius: 50%; background: var(--color-text-muted); }
.input-container { display: flex; gap: 0.5rem; padding: 0.75rem 1rem; border-top: 1px solid var(--color-border); }
.chat-input { flex: 1; resize: none; background: var(--color-input-bg); color: var(--color-text-primary); border: 1px solid var(--color-border); border-radius: 0.5rem; padding: 0.5rem; }
.chat-footer { font-size: 0.75rem; color: var(--color-text-muted); padding: 0.5rem 1rem; }
.panel-overlay, .menu-backdrop { position: fixed; inset: 0; z-index: 30; }
.panel-overlay { background: var(--color-bg-overlay); }
.panel, .modal { position: fixed; z-index: 40; background: var(--color-bg-secondary); padding: 1rem; overflow-y: auto; }
.panel { top: 0; right: 0; bottom: 0; width: min(24rem, 100%); }
.modal { top: 10%; left: 50%; transform: translateX(-50%); width: min(36rem, 92%); max-height: 80%; border-radius: 0.75rem; }
.user-preferences-menu { position: fixed; top: 20px; right: 20px; z-index: 50; display: flex; gap: 0.25rem; background: var(--color-bg-secondary); padding: 0.4rem; border-radius: 0.5rem; }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f4f6f8;
    --color-bg-secondary: #ffffff;
    --color-bg-overlay: rgba(0, 0, 0, 0.35);
    --color-text-primary: #1b1f24;
    --color-text-muted: #5b6470;
    --color-border: #d5dae0;
    --color-input-bg: #ffffff;
    --color-header-bg: #12355b;
    --color-header-text: #ffffff;
    --color-chat-user-bg: #12355b;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #ffffff;
    --color-chat-assistant-text: #1b1f24;
    --color-status-on: #2e9e5b;
    --color-status-off: #c0392b;
    --color-error: #b3261e;
    --color-error-bg: #fdecea;
}
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0f1419;
    --color-bg-secondary: #1a2129;
    --color-bg-overlay: rgba(0, 0, 0, 0.6);
    --color-text-primary: #e6e9ed;
    --color-text-muted: #9aa4af;
    --color-border: #2c3642;
    --color-input-bg: #141a21;
    --color-header-bg: #0b2440;
    --color-header-text: #e6e9ed;
    --color-chat-user-bg: #2a5c8f;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #1f2731;
    --color-chat-assistant-text: #e6e9ed;
    --color-status-on: #3ccf7a;
    --color-status-off: #e5533d;
    --color-error: #ff8a80;
    --color-error-bg: #3b1d1b;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_sizes_grow() {
        assert!(root_font_px(FontSize::Small) < root_font_px(FontSize::Medium));
        assert!(root_font_px(FontSize::Medium) < root_font_px(FontSize::Large));
    }

    fn z_index(selector: &str) -> i32 {
        let rule = BASE_CSS
            .lines()
            .find(|line| line.starts_with(selector))
            .unwrap();
        let value = rule.split("z-index:").nth(1).unwrap();
        value.split(';').next().unwrap().trim().parse().unwrap()
    }

    #[test]
    fn header_stays_clickable_over_menu_backdrop() {
        assert!(z_index(".chat-header") > z_index(".panel-overlay, .menu-backdrop"));
        assert!(z_index(".chat-header") < z_index(".user-preferences-menu"));
    }

    #[test]
    fn dark_theme_adds_root_class() {
        assert!(theme_definition(true).root_class.contains("dark-theme"));
        assert!(!theme_definition(false).root_class.contains("dark-theme"));
    }
}
