//! Text-scan decoder: extracts layout names directly from the XKB keymap's
//! textual `xkb_layout { ... name[Group1] = "..."; ... }` section, without
//! linking against libxkbcommon at all. This is the decoder of last resort
//! and always succeeds or fails cleanly — it never touches a system library.

use std::sync::OnceLock;

use regex::Regex;

fn layout_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"xkb_layout\s*\{\s*"([^"]+)""#).unwrap())
}

fn group_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"name\[Group(\d+)\]\s*=\s*"([^"]+)""#).unwrap())
}

/// Scans the keymap text for `xkb_layout { "..." ... }` header names first,
/// collecting every match; if none appear, falls back to indexed
/// `name[GroupN] = "..."` entries ordered by group index. If neither
/// pattern matches anything, the decode is still "successful" per the
/// decoder's contract — it just has nothing to report — so the sentinel
/// `"Unknown"` is returned instead of an empty set.
pub fn decode(keymap_text: &str) -> Vec<String> {
    let layouts: Vec<String> = layout_block_re()
        .captures_iter(keymap_text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();
    if !layouts.is_empty() {
        return layouts;
    }

    let mut groups: Vec<(u32, String)> = group_name_re()
        .captures_iter(keymap_text)
        .filter_map(|caps| {
            let index: u32 = caps.get(1)?.as_str().parse().ok()?;
            let name = caps.get(2)?.as_str().to_string();
            Some((index, name))
        })
        .collect();

    if !groups.is_empty() {
        groups.sort_by_key(|(index, _)| *index);
        return groups.into_iter().map(|(_, name)| name).collect();
    }

    vec!["Unknown".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_layout_header_over_indexed_group_names() {
        let text = r#"xkb_layout { "us" include "pc+us+inet(evdev)" };"#;
        assert_eq!(decode(text), vec!["us".to_string()]);
    }

    #[test]
    fn collects_every_layout_header_match() {
        let text = r#"
            xkb_layout { "us" include "pc+us+inet(evdev)" };
            xkb_layout { "de" include "pc+de+inet(evdev)" };
        "#;
        assert_eq!(decode(text), vec!["us".to_string(), "de".to_string()]);
    }

    #[test]
    fn falls_back_to_indexed_group_names_in_order() {
        let text = r#"
            xkb_layout "custom" {
                name[Group2] = "German";
                name[Group1] = "English (US)";
            };
        "#;
        assert_eq!(
            decode(text),
            vec!["English (US)".to_string(), "German".to_string()]
        );
    }

    #[test]
    fn falls_back_to_unknown_when_nothing_matches() {
        assert_eq!(decode("not a keymap at all"), vec!["Unknown".to_string()]);
    }
}
