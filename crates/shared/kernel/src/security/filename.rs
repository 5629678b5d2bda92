use unicode_normalization::UnicodeNormalization;

const WINDOWS_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Turns client-supplied file names into names safe to join onto a directory.
#[derive(Debug)]
pub struct FileNameGuard;

impl FileNameGuard {
    /// Sanitizes an uploaded file name.
    ///
    /// * NFKD-decomposed, then non-ASCII characters are dropped (`é` keeps its `e`),
    /// * `/` and `\` become spaces, whitespace runs become a single `_`,
    /// * only `A-Z a-z 0-9 _ . -` survive,
    /// * leading/trailing `.` and `_` are stripped,
    /// * Windows device names (`CON`, `LPT1`, ...) get a `_` prefix.
    ///
    /// Returns `None` when nothing usable is left.
    #[must_use]
    pub fn sanitize(name: &str) -> Option<String> {
        let ascii: String = name
            .nfkd()
            .filter(char::is_ascii)
            .map(|c| if matches!(c, '/' | '\\') { ' ' } else { c })
            .collect();

        let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
        let kept: String = joined
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
            .collect();
        let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

        if trimmed.is_empty() {
            return None;
        }

        let stem = trimmed.split('.').next().unwrap_or_default().to_ascii_uppercase();
        if WINDOWS_DEVICE_NAMES.contains(&stem.as_str()) {
            Some(format!("_{trimmed}"))
        } else {
            Some(trimmed.to_owned())
        }
    }

    /// Lowercased text after the last `.`, if the name has one.
    #[must_use]
    pub fn extension(name: &str) -> Option<String> {
        name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_traversal_and_separators() {
        assert_eq!(FileNameGuard::sanitize("../../etc/passwd").as_deref(), Some("etc_passwd"));
        assert_eq!(FileNameGuard::sanitize(r"C:\tmp\clip.mp4").as_deref(), Some("C_tmp_clip.mp4"));
    }

    #[test]
    fn collapses_whitespace_and_drops_symbols() {
        assert_eq!(FileNameGuard::sanitize("my  cool\tmovie.mov").as_deref(), Some("my_cool_movie.mov"));
        assert_eq!(FileNameGuard::sanitize("pho$to (1).png").as_deref(), Some("photo_1.png"));
    }

    #[test]
    fn accented_letters_keep_their_base_letter() {
        assert_eq!(FileNameGuard::sanitize("résumé.jpg").as_deref(), Some("resume.jpg"));
        assert_eq!(FileNameGuard::sanitize("vidéos_real_1.mp4").as_deref(), Some("videos_real_1.mp4"));
        assert_eq!(FileNameGuard::sanitize("ﬁle①.png").as_deref(), Some("file1.png"));
    }

    #[test]
    fn prefixes_device_names() {
        assert_eq!(FileNameGuard::sanitize("con.mp4").as_deref(), Some("_con.mp4"));
        assert_eq!(FileNameGuard::sanitize("console.mp4").as_deref(), Some("console.mp4"));
    }

    #[test]
    fn empty_results_are_rejected() {
        assert_eq!(FileNameGuard::sanitize("..."), None);
        assert_eq!(FileNameGuard::sanitize("日本語"), None);
        assert_eq!(FileNameGuard::sanitize(""), None);
    }

    #[test]
    fn extension_is_lowercased_after_last_dot() {
        assert_eq!(FileNameGuard::extension("clip.final.MP4").as_deref(), Some("mp4"));
        assert_eq!(FileNameGuard::extension("noext"), None);
        assert_eq!(FileNameGuard::extension("trailing.").as_deref(), Some(""));
    }
}
