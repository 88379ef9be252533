//! Lower-cased views of a scanned file, computed once per file.

use crate::scanner::SourceFile;

pub struct FileView<'a> {
    pub file: &'a SourceFile,
    pub name_lower: String,
    pub content_lower: String,
    pub lines_lower: Vec<String>,
    /// Byte offset of each line start in `file.content`.
    line_starts: Vec<usize>,
}

impl<'a> FileView<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            file.content
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            file,
            name_lower: file.file_name_lower(),
            content_lower: file.content.to_lowercase(),
            lines_lower: file.lines.iter().map(|l| l.to_lowercase()).collect(),
            line_starts,
        }
    }

    /// 1-based line number containing byte `offset` of the content.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// True when any entity spelling occurs within `window` lines of `index` (0-based).
    pub fn entity_near_line(&self, index: usize, window: usize, spellings: &[&str]) -> bool {
        if self.lines_lower.is_empty() {
            return false;
        }
        let lo = index.saturating_sub(window);
        let hi = (index + window).min(self.lines_lower.len() - 1);
        self.lines_lower[lo..=hi]
            .iter()
            .any(|l| spellings.iter().any(|s| l.contains(s)))
    }

    /// True when any entity spelling occurs within `window` characters either
    /// side of the byte span `start..end` of the content. Case-insensitive.
    pub fn entity_near_span(
        &self,
        start: usize,
        end: usize,
        window: usize,
        spellings: &[&str],
    ) -> bool {
        let content = self.file.content.as_str();
        let (Some(before), Some(after)) = (content.get(..start), content.get(end..)) else {
            return false;
        };
        let lo = match window {
            0 => start,
            n => before.char_indices().rev().nth(n - 1).map_or(0, |(i, _)| i),
        };
        let hi = after.char_indices().nth(window).map_or(content.len(), |(i, _)| end + i);
        let nearby = content[lo..hi].to_lowercase();
        spellings.iter().any(|s| nearby.contains(s))
    }
}
