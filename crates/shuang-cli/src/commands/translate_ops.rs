use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use shuang_core::scheme::{KeyLookup, KeyTable, SchemeCatalog, SchemeDefinition};
use shuang_core::settings::settings;
use shuang_core::text::{prepare_text, PinyinRomanizer, Romanizer};


#[derive(Debug, Serialize)]
struct SchemeInfo<'a> {
    code: &'a str,
    name: &'a str,
}

/// One prepared character with its syllable and keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitRow {
    pub ch: char,
    pub syllable: Option<String>,
    pub keys: Option<String>,
}

/// Resolve `code`, falling back to the configured scheme.
pub(crate) fn resolve_scheme(code: Option<&str>) -> &'static SchemeDefinition {
    let code = code.unwrap_or(&settings().practice.scheme);
    die!(SchemeCatalog::global().resolve(code), "Error: {}")
}

pub fn schemes(json: bool) {
    let catalog = SchemeCatalog::global();
    if json {
        let infos: Vec<SchemeInfo> = catalog
            .iter()
            .map(|s| SchemeInfo {
                code: &s.code,
                name: &s.name,
            })
            .collect();
        let out = die!(serde_json::to_string_pretty(&infos), "Error: {}");
        println!("{out}");
        return;
    }
    let default_code = &settings().practice.scheme;
    for s in catalog.iter() {
        let marker = if &s.code == default_code { " *" } else { "" };
        println!("{:<10} {}{marker}", s.code, s.name);
    }
}

pub fn translate(scheme: Option<&str>, syllables: &[String]) {
    let table = resolve_scheme(scheme).key_table();
    print!("{}", format_translations(&table, syllables));
}

pub fn prepare(text: &str, scheme: Option<&str>, skip_non_chinese: bool, json: bool) {
    let table = resolve_scheme(scheme).key_table();
    let rows = prepare_rows(text, skip_non_chinese, &table, &PinyinRomanizer);
    if json {
        let out = die!(serde_json::to_string_pretty(&rows), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", format_rows(&rows));
    }
}

pub fn format_translations(table: &KeyTable, syllables: &[String]) -> String {
    let width = syllables.iter().map(|s| s.width()).max().unwrap_or(0);
    let mut out = String::new();
    for syllable in syllables {
        let keys = match table.translate(syllable) {
            KeyLookup::Keys(k) => k,
            KeyLookup::Empty => "(empty)".to_string(),
            KeyLookup::Untranslatable => "-".to_string(),
        };
        let pad = " ".repeat(width - syllable.width());
        out.push_str(&format!("{syllable}{pad}  {keys}\n"));
    }
    out
}

pub fn prepare_rows(
    text: &str,
    skip_non_chinese: bool,
    table: &KeyTable,
    romanizer: &dyn Romanizer,
) -> Vec<UnitRow> {
    prepare_text(text, skip_non_chinese, romanizer)
        .into_iter()
        .map(|p| UnitRow {
            keys: table.keys_for(p.syllable.as_deref()),
            ch: p.ch,
            syllable: p.syllable,
        })
        .collect()
}

/// Three columns: character, syllable, keys. Units needing no input show `-`.
pub fn format_rows(rows: &[UnitRow]) -> String {
    let syllable_width = rows
        .iter()
        .filter_map(|r| r.syllable.as_deref())
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(1)
        .max(1);
    let mut out = String::new();
    for row in rows {
        let ch = row.ch.to_string();
        // Hanzi are two columns wide, ASCII one.
        let ch_pad = " ".repeat(2usize.saturating_sub(ch.width()));
        let syllable = row.syllable.as_deref().unwrap_or("-");
        let syl_pad = " ".repeat(syllable_width.saturating_sub(syllable.width()));
        let keys = row.keys.as_deref().unwrap_or("-");
        out.push_str(&format!("{ch}{ch_pad}  {syllable}{syl_pad}  {keys}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xiaohe() -> KeyTable {
        SchemeCatalog::global().get("xiaohe").unwrap().key_table()
    }

    #[test]
    fn translations_are_aligned() {
        let syllables = vec!["an".to_string(), "zhuang".to_string(), "hm".to_string()];
        let out = format_translations(&xiaohe(), &syllables);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "an      an");
        assert_eq!(lines[1], "zhuang  vl");
        assert_eq!(lines[2], "hm      -");
    }

    #[test]
    fn empty_syllable_marked() {
        let out = format_translations(&xiaohe(), &["  ".to_string()]);
        assert!(out.contains("(empty)"));
    }

    #[test]
    fn rows_carry_keys() {
        let rows = prepare_rows("中国，a", false, &xiaohe(), &PinyinRomanizer);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].keys.as_deref(), Some("vs"));
        assert_eq!(rows[1].syllable.as_deref(), Some("guo"));
        assert_eq!(rows[2].keys, None);
        assert_eq!(rows[3].keys.as_deref(), Some("aa"));

        let skipped = prepare_rows("中国，a", true, &xiaohe(), &PinyinRomanizer);
        assert_eq!(skipped[3].keys, None);
    }

    #[test]
    fn rows_format_in_columns() {
        let rows = vec![
            UnitRow {
                ch: '中',
                syllable: Some("zhong".to_string()),
                keys: Some("vs".to_string()),
            },
            UnitRow {
                ch: '，',
                syllable: None,
                keys: None,
            },
            UnitRow {
                ch: 'a',
                syllable: Some("a".to_string()),
                keys: Some("aa".to_string()),
            },
        ];
        let out = format_rows(&rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "中  zhong  vs");
        assert_eq!(lines[1], "，  -      -");
        assert_eq!(lines[2], "a   a      aa");
    }

    #[test]
    fn rows_serialize_to_json() {
        let rows = prepare_rows("中", false, &xiaohe(), &PinyinRomanizer);
        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(json, r#"[{"ch":"中","syllable":"zhong","keys":"vs"}]"#);
    }
}
