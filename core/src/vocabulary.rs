use std::ops::RangeInclusive;

include!(concat!(env!("OUT_DIR"), "/default_vocabulary.rs"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    Vocabulary,
    Listing,
}

/// A path that might name an image next to the page. Unconfirmed until probed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub path: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn guessed(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: CandidateSource::Vocabulary,
        }
    }

    pub fn scraped(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: CandidateSource::Listing,
        }
    }
}

/// Naming convention the loader guesses from: `{prefix}{stem}.{ext}` where a
/// stem is either a basename or a number from the range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    pub prefix: String,
    pub basenames: Vec<String>,
    pub numbers: RangeInclusive<u32>,
    pub extensions: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            basenames: DEFAULT_BASENAMES.iter().map(|name| name.to_string()).collect(),
            numbers: DEFAULT_NUMBER_START..=DEFAULT_NUMBER_END,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    fn stems(&self) -> impl Iterator<Item = String> + '_ {
        self.basenames
            .iter()
            .cloned()
            .chain(self.numbers.clone().map(|n| n.to_string()))
    }

    pub fn stem_count(&self) -> usize {
        let numbers = if self.numbers.is_empty() {
            0
        } else {
            (*self.numbers.end() - *self.numbers.start()) as usize + 1
        };
        self.basenames.len() + numbers
    }

    /// Number of candidates `candidates()` yields, known before any probing.
    pub fn len(&self) -> usize {
        self.stem_count() * self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Basenames first, then numbers, each crossed with every extension in
    /// declaration order.
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(self.len());
        for stem in self.stems() {
            for ext in &self.extensions {
                out.push(Candidate::guessed(format!("{}{stem}.{ext}", self.prefix)));
            }
        }
        out
    }

    /// Example filenames shown when nothing was discovered.
    pub fn naming_examples(&self, limit: usize) -> Vec<String> {
        let ext = self
            .extensions
            .first()
            .map(String::as_str)
            .unwrap_or("jpg");
        self.stems()
            .take(limit)
            .map(|stem| format!("{}{stem}.{ext}", self.prefix))
            .collect()
    }

    /// Tile label: the last path segment with the naming prefix removed.
    pub fn display_name<'a>(&self, filename: &'a str) -> &'a str {
        if self.prefix.is_empty() {
            return filename;
        }
        match filename.strip_prefix(self.prefix.as_str()) {
            Some(rest) if !rest.is_empty() => rest,
            _ => filename,
        }
    }

    pub fn has_image_extension(&self, path: &str) -> bool {
        let Some(ext) = path_extension(path) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }
}

/// Last segment of a path or URL, ignoring query and fragment.
pub fn file_name(path: &str) -> &str {
    let path = strip_query(path).trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn path_extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Vocabulary {
        Vocabulary {
            prefix: "image.".to_string(),
            basenames: vec!["logo".to_string(), "banner".to_string()],
            numbers: 1..=3,
            extensions: vec!["png".to_string(), "jpg".to_string()],
        }
    }

    #[test]
    fn candidates_follow_declaration_order() {
        let paths: Vec<String> = small().candidates().into_iter().map(|c| c.path).collect();
        assert_eq!(
            paths,
            vec![
                "image.logo.png",
                "image.logo.jpg",
                "image.banner.png",
                "image.banner.jpg",
                "image.1.png",
                "image.1.jpg",
                "image.2.png",
                "image.2.jpg",
                "image.3.png",
                "image.3.jpg",
            ]
        );
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn empty_number_range_contributes_nothing() {
        let mut vocab = small();
        vocab.numbers = 1..=0;
        assert_eq!(vocab.stem_count(), 2);
        assert_eq!(vocab.candidates().len(), 4);
    }

    #[test]
    fn display_name_strips_prefix_only_when_present() {
        let vocab = small();
        assert_eq!(vocab.display_name("image.logo.png"), "logo.png");
        assert_eq!(vocab.display_name("holiday.png"), "holiday.png");
        assert_eq!(vocab.display_name("image."), "image.");
    }

    #[test]
    fn extension_check_ignores_case_and_query() {
        let vocab = small();
        assert!(vocab.has_image_extension("photos/Cat.PNG"));
        assert!(vocab.has_image_extension("cat.jpg?v=2#top"));
        assert!(!vocab.has_image_extension("notes.txt"));
        assert!(!vocab.has_image_extension(".png"));
        assert!(!vocab.has_image_extension("folder/"));
    }

    #[test]
    fn default_vocabulary_is_bounded() {
        let vocab = Vocabulary::default();
        assert!(!vocab.is_empty());
        assert_eq!(vocab.candidates().len(), vocab.len());
        assert!(vocab.len() <= 512);
    }
}
