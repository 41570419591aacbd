use crate::errors::Result;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

// ISO-8859-1 解码：每个字节直接对应 U+0000..=U+00FF
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// 按行切分文本，行结束符可以是 `\n`、`\r\n` 或单独的 `\r`。
/// 结束符不包含在返回的行中，末尾的结束符不会产生空行。
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += 1;
                if i < bytes.len() && bytes[i] == b'\n' {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// NFD 分解后去掉组合变音符号，保留基础字母
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_diacritic(*c)).collect()
}

/// 覆盖写入文件，不创建目录。文件句柄在所有路径上随作用域释放。
pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_high_bytes_to_accented_letters() {
        assert_eq!(decode_latin1(b"Telef\xf3nica"), "Telefónica");
        assert_eq!(decode_latin1(b"\xd1"), "Ñ");
    }

    #[test]
    fn splits_on_every_line_terminator() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn strips_precomposed_and_decomposed_marks() {
        assert_eq!(strip_diacritics("Telefónica"), "Telefonica");
        assert_eq!(strip_diacritics("Cotizaci\u{006F}\u{0301}n"), "Cotizacion");
        assert_eq!(strip_diacritics("Año"), "Ano");
    }

    #[test]
    fn keeps_characters_outside_the_combining_block() {
        assert_eq!(strip_diacritics("€ 1.234,5 ß"), "€ 1.234,5 ß");
    }

    #[test]
    fn write_text_file_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_text_file(&path, "first version").unwrap();
        write_text_file(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_text_file_does_not_create_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(write_text_file(&path, "x").is_err());
    }
}
