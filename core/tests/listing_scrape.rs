use pages_gallery_core::listing::{directory_url, scrape_image_paths};
use pages_gallery_core::Vocabulary;

fn vocabulary() -> Vocabulary {
    Vocabulary {
        prefix: "image.".to_string(),
        basenames: Vec::new(),
        numbers: 1..=2,
        extensions: vec!["png".to_string(), "jpg".to_string(), "svg".to_string()],
    }
}

#[test]
fn keeps_image_links_relative_to_the_page_directory() {
    let directory = directory_url("https://alice.github.io/site/index.html").unwrap();
    let html = r#"
        <ul>
          <li><a href="image.logo.png">logo</a></li>
          <li><a href="./photos/Cat.JPG?v=3">cat</a></li>
          <li><a href="/site/image.logo.png#x">again</a></li>
          <li><a href="notes.txt">notes</a></li>
          <li><a href="../other/pic.png">elsewhere</a></li>
          <li><a href="https://cdn.example.com/x.svg">cdn</a></li>
          <li><a href="mailto:alice@example.com">mail</a></li>
          <li><a href="sub/">folder</a></li>
        </ul>
    "#;
    let paths = scrape_image_paths(html, &directory, &vocabulary());
    assert_eq!(
        paths,
        vec![
            "image.logo.png",
            "photos/Cat.JPG?v=3",
            "https://alice.github.io/other/pic.png",
            "https://cdn.example.com/x.svg",
        ]
    );
}

#[test]
fn page_without_anchors_yields_nothing() {
    let directory = directory_url("https://alice.github.io/site/").unwrap();
    let paths = scrape_image_paths("<html><body><img src=\"a.png\"></body></html>", &directory, &vocabulary());
    assert!(paths.is_empty());
}
