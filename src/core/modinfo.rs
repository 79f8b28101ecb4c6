use crate::models::mod_info::ModInfo;

/// File name of the descriptor every mod archive carries.
pub const DESCRIPTOR_NAME: &str = "modinfo.ini";

/// Parses descriptor text into a `ModInfo`.
///
/// Each line is split at its first `=`; the rest of the line, further `=`
/// included, is the value, untrimmed. Lines without a separator are
/// skipped. Keys match case-sensitively; a duplicated key keeps its last
/// value. There is no failure mode; malformed input just yields a partial
/// record.
pub fn parse(text: &str) -> ModInfo {
    let normalized = text.replace('\r', "");

    let mut info = ModInfo::default();
    for line in normalized.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key {
            "name" => info.name = value.to_string(),
            "NameAsBundle" => info.name_as_bundle = value.to_string(),
            "description" => info.description = value.to_string(),
            "author" => info.author = value.to_string(),
            "version" => info.version = value.to_string(),
            "screenshot" => info.screenshot = value.to_string(),
            _ => {}
        }
    }

    info
}
