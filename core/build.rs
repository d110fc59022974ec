use std::collections::HashSet;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const MAX_CANDIDATES: usize = 512;

#[derive(Deserialize)]
struct VocabularyFile {
    prefix: Option<String>,
    basenames: Vec<String>,
    numbers: Option<NumberRange>,
    extensions: Vec<String>,
}

#[derive(Deserialize)]
struct NumberRange {
    start: u32,
    end: u32,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=GALLERY_VOCABULARY_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let vocabulary_path = resolve_vocabulary_path(workspace_root);
    println!("cargo:rerun-if-changed={}", vocabulary_path.display());

    let contents = fs::read_to_string(&vocabulary_path).unwrap_or_else(|err| {
        panic!(
            "failed to read probe vocabulary at {}: {err}",
            vocabulary_path.display()
        )
    });

    let vocabulary: VocabularyFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse probe vocabulary at {}: {err}",
            vocabulary_path.display()
        )
    });

    let basenames = normalize_words(&vocabulary.basenames);
    let extensions = normalize_extensions(&vocabulary.extensions);
    validate(&vocabulary, &basenames, &extensions, &vocabulary_path);

    let prefix = vocabulary.prefix.as_deref().unwrap_or("").trim();
    let (start, end) = vocabulary
        .numbers
        .as_ref()
        .map(|range| (range.start, range.end))
        .unwrap_or((1, 0));

    let mut output = String::new();
    writeln!(&mut output, "pub const DEFAULT_PREFIX: &str = {};", rust_string(prefix)).unwrap();
    writeln!(&mut output, "pub const DEFAULT_NUMBER_START: u32 = {start};").unwrap();
    writeln!(&mut output, "pub const DEFAULT_NUMBER_END: u32 = {end};").unwrap();
    writeln!(&mut output, "pub const MAX_CANDIDATES: usize = {MAX_CANDIDATES};").unwrap();
    writeln!(&mut output).unwrap();
    writeln!(&mut output, "pub const DEFAULT_BASENAMES: &[&str] = &[").unwrap();
    for name in &basenames {
        writeln!(&mut output, "    {},", rust_string(name)).unwrap();
    }
    writeln!(&mut output, "];").unwrap();
    writeln!(&mut output).unwrap();
    writeln!(&mut output, "pub const DEFAULT_EXTENSIONS: &[&str] = &[").unwrap();
    for ext in &extensions {
        writeln!(&mut output, "    {},", rust_string(ext)).unwrap();
    }
    writeln!(&mut output, "];").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("default_vocabulary.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_vocabulary_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("GALLERY_VOCABULARY_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("gallery/vocabulary.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn normalize_words(words: &[String]) -> Vec<String> {
    words.iter().map(|word| word.trim().to_string()).collect()
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .collect()
}

fn validate(
    vocabulary: &VocabularyFile,
    basenames: &[String],
    extensions: &[String],
    vocabulary_path: &Path,
) {
    if extensions.is_empty() {
        panic!("probe vocabulary {} has no extensions", vocabulary_path.display());
    }

    let mut seen = HashSet::new();
    for name in basenames {
        if name.is_empty() {
            panic!("basename cannot be empty in {}", vocabulary_path.display());
        }
        if name.contains('/') || name.contains('\\') {
            panic!(
                "basename '{}' cannot contain a path separator in {}",
                name,
                vocabulary_path.display()
            );
        }
        if !seen.insert(name.clone()) {
            panic!(
                "duplicate basename '{}' in {}",
                name,
                vocabulary_path.display()
            );
        }
    }

    let mut seen = HashSet::new();
    for ext in extensions {
        if ext.is_empty() || !ext.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            panic!(
                "invalid extension '{}' in {}",
                ext,
                vocabulary_path.display()
            );
        }
        if !seen.insert(ext.clone()) {
            panic!(
                "duplicate extension '{}' in {}",
                ext,
                vocabulary_path.display()
            );
        }
    }

    if let Some(prefix) = vocabulary.prefix.as_deref() {
        if prefix.contains('/') {
            panic!(
                "prefix '{}' cannot contain a path separator in {}",
                prefix,
                vocabulary_path.display()
            );
        }
    }

    let numbers = match vocabulary.numbers.as_ref() {
        Some(range) if range.start > range.end => panic!(
            "number range {}..={} is empty in {}",
            range.start,
            range.end,
            vocabulary_path.display()
        ),
        Some(range) => (range.end - range.start + 1) as usize,
        None => 0,
    };

    let stems = basenames.len() + numbers;
    if stems == 0 {
        panic!(
            "probe vocabulary {} has neither basenames nor numbers",
            vocabulary_path.display()
        );
    }
    let total = stems * extensions.len();
    if total > MAX_CANDIDATES {
        panic!(
            "probe vocabulary {} expands to {} candidates, limit is {}",
            vocabulary_path.display(),
            total,
            MAX_CANDIDATES
        );
    }
}
