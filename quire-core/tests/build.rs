use std::fs;
use std::path::Path;

use quire_core::config::Config;
use quire_core::{
    BuildError, ContentQuery, ContentScanner, IngestionError, PagePlanner, SiteBuilder, annotate_all, build_site,
};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn post(title: &str, date: &str) -> String {
    format!("---\ntitle: {title}\ndate: {date}\ndescription: All about {title}\n---\n\n# {title}\n\nWritten in {title}.\n")
}

fn three_posts() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write(&content, "january/index.md", &post("January", "2024-01-01"));
    write(&content, "february.md", &post("February", "2024-02-01"));
    write(&content, "march/index.md", &post("March", "2024-03-01"));
    write(&content, "march/cover.png", "not really a png");
    tmp
}

#[test]
fn three_posts_link_to_their_neighbors() {
    let tmp = three_posts();
    let site = SiteBuilder::new()
        .content_dir(tmp.path().join("content"))
        .build()
        .unwrap();
    let pages = &site.plan().pages;

    let summary: Vec<_> = pages
        .iter()
        .map(|p| {
            (
                p.path.as_str(),
                p.context.previous.as_ref().map(|d| d.frontmatter.title.as_str()),
                p.context.next.as_ref().map(|d| d.frontmatter.title.as_str()),
            )
        })
        .collect();

    assert_eq!(
        summary,
        [
            ("/march/", Some("February"), None),
            ("/february/", Some("January"), Some("March")),
            ("/january/", None, Some("February")),
        ]
    );
}

#[test]
fn full_build_writes_pages_and_assets() {
    let tmp = three_posts();
    let out = tmp.path().join("public");

    let report = build_site(&Config::default(), &tmp.path().join("content"), &out, None).unwrap();
    assert_eq!(report.pages.len(), 4);
    assert_eq!(report.assets.len(), 1);

    let march = fs::read_to_string(out.join("march/index.html")).unwrap();
    assert!(march.contains("<h1>March</h1>"));
    assert!(march.contains("href=\"/february/\" rel=\"prev\""));
    assert!(!march.contains("rel=\"next\""));
    assert!(march.contains("All about March"));

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    let order: Vec<_> = ["/march/", "/february/", "/january/"]
        .iter()
        .map(|slug| index.find(&format!("href=\"{slug}\"")).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    assert!(out.join("march/cover.png").is_file());
    assert!(out.join("february/index.html").is_file());
    assert!(out.join("january/index.html").is_file());
}

#[test]
fn encoded_slugs_write_decoded_directories() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write(&content, "my first post.md", &post("First", "2024-01-01"));
    write(&content, "café.md", &post("Cafe", "2024-01-02"));
    let out = tmp.path().join("public");

    build_site(&Config::default(), &content, &out, None).unwrap();
    assert!(out.join("café/index.html").is_file());
    assert!(out.join("my first post/index.html").is_file());
    assert!(!out.join("caf%C3%A9").exists());

    let cafe = fs::read_to_string(out.join("café/index.html")).unwrap();
    assert!(cafe.contains("href=\"/my%20first%20post/\" rel=\"prev\""));
}

#[test]
fn body_starting_with_a_rule_keeps_its_content() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write(
        &content,
        "ruled.md",
        "---\ntitle: Ruled\ndate: 2024-01-01\n---\n---\nIntro paragraph here.\n\n---\n\nRest.\n",
    );
    let out = tmp.path().join("public");

    build_site(&Config::default(), &content, &out, None).unwrap();
    let page = fs::read_to_string(out.join("ruled/index.html")).unwrap();
    assert!(page.contains("<p>Intro paragraph here.</p>"));
    assert!(page.contains("<p>Rest.</p>"));

    let site = SiteBuilder::new().content_dir(&content).build().unwrap();
    let doc = &site.plan().documents[0];
    assert_eq!(doc.word_count.words, 4);
    assert!(doc.excerpt.starts_with("Intro paragraph here."));
}

#[test]
fn active_theme_reaches_templates() {
    let tmp = three_posts();
    let out = tmp.path().join("public");
    let config: Config = toml::from_str("[theme]\nactive = \"light\"\n").unwrap();

    build_site(&config, &tmp.path().join("content"), &out, None).unwrap();
    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("background: #f1f1f1;"));
}

#[test]
fn malformed_post_aborts_without_writing() {
    let tmp = three_posts();
    write(&tmp.path().join("content"), "broken.md", "---\ntitle: Broken\n---\nno date");
    let out = tmp.path().join("public");

    let err = build_site(&Config::default(), &tmp.path().join("content"), &out, None).unwrap_err();
    assert!(matches!(err, BuildError::MalformedFrontMatter { .. }));
    assert!(!out.exists());
}

#[test]
fn duplicate_slugs_abort_the_build() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    write(&content, "hello.md", &post("Hello", "2024-01-01"));
    write(&content, "hello/index.md", &post("Hello again", "2024-01-02"));

    let err = SiteBuilder::new().content_dir(&content).build().err().unwrap();
    assert!(matches!(
        err,
        BuildError::Ingestion(IngestionError::DuplicateSlug { .. })
    ));
}

#[test]
fn missing_content_dir_is_a_store_error() {
    let tmp = TempDir::new().unwrap();
    let err = SiteBuilder::new()
        .content_dir(tmp.path().join("missing"))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, BuildError::Store(_)));
}

#[test]
fn empty_content_dir_builds_only_the_index() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    fs::create_dir_all(&content).unwrap();

    let site = SiteBuilder::new().content_dir(&content).build().unwrap();
    assert!(site.plan().pages.is_empty());
    assert!(site.plan().index.posts.is_empty());
}

#[test]
fn annotation_is_stable_across_scans() {
    let tmp = three_posts();
    let content = tmp.path().join("content");

    let slugs = || {
        let mut nodes = ContentScanner::new(&content).scan().unwrap();
        annotate_all(&mut nodes).unwrap();
        nodes
            .iter()
            .filter_map(|n| n.slug().map(str::to_string))
            .collect::<Vec<_>>()
    };

    let first = slugs();
    assert_eq!(first.len(), 3);
    assert_eq!(first, slugs());
}

#[test]
fn planning_through_the_public_api() {
    let tmp = three_posts();
    let mut nodes = ContentScanner::new(tmp.path().join("content")).scan().unwrap();
    annotate_all(&mut nodes).unwrap();

    let plan = PagePlanner::new().plan(&ContentQuery::new(&nodes)).unwrap();
    assert_eq!(plan.pages.len(), 3);
    assert_eq!(plan.documents[0].frontmatter.title, "March");
    assert_eq!(plan.documents[0].word_count.words, 4);
}

#[test]
fn template_dir_overrides_post_template() {
    let tmp = three_posts();
    let templates = tmp.path().join("templates");
    write(
        &templates,
        "blog-post.html",
        "{{ post.frontmatter.title }}|{% if previous %}{{ previous.slug }}{% endif %}|{% if next %}{{ next.slug }}{% endif %}",
    );
    let out = tmp.path().join("public");

    build_site(&Config::default(), &tmp.path().join("content"), &out, Some(&templates)).unwrap();
    let february = fs::read_to_string(out.join("february/index.html")).unwrap();
    assert_eq!(february, "February|&#x2F;january&#x2F;|&#x2F;march&#x2F;");
}
