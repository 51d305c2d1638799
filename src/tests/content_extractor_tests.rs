use std::sync::Arc;
use std::time::Duration;

use crate::implementations::config::CheckerConfig;
use crate::implementations::content_extractor::{ interpret_payload, ContentExtractor };
use crate::errors::ClientError;
use crate::implementations::content_extractor::content_schema;
use crate::implementations::page_fetcher::{ chunk_text, main_text, LlmPageExtractor };
use crate::models::{ ArticleLink, ContentStatus };
use crate::tests::mocks::{ content_payload, MapExtractor, ScriptedModel };
use crate::traits::ExtractionOutcome;

fn links(urls: &[&str]) -> Vec<ArticleLink> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| ArticleLink::new(*url, format!("Title {}", i)))
        .collect()
}

fn extractor_with(pages: MapExtractor, concurrency: usize) -> (ContentExtractor, Arc<MapExtractor>) {
    let mut config = CheckerConfig::default();
    config.pipeline.concurrency = concurrency;
    let pages = Arc::new(pages);
    (ContentExtractor::new(pages.clone(), &config).unwrap(), pages)
}

#[tokio::test]
async fn test_failed_link_is_isolated_and_order_kept() {
    let pages = MapExtractor::new()
        .page("https://a.example/1", content_payload("first article"))
        .page("https://b.example/2", ExtractionOutcome::failure("connection reset"))
        .page("https://c.example/3", content_payload("third article"))
        // finishes first, but must stay last in the output
        .delayed("https://a.example/1", Duration::from_millis(40));
    let (extractor, _) = extractor_with(pages, 4);

    let urls = ["https://a.example/1", "https://b.example/2", "https://c.example/3"];
    let contents = extractor.extract(&links(&urls), &["water".to_string()]).await;

    assert_eq!(contents.len(), 3);
    let got: Vec<&str> = contents.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(got, urls.to_vec());

    assert_eq!(contents[0].status, ContentStatus::Ok);
    assert_eq!(contents[0].text, "first article");
    assert_eq!(contents[1].status, ContentStatus::Failed);
    assert!(contents[1].text.is_empty());
    assert_eq!(contents[1].error.as_deref(), Some("connection reset"));
    assert_eq!(contents[2].status, ContentStatus::Ok);
    assert_eq!(contents[2].text, "third article");
}

#[tokio::test]
async fn test_empty_and_malformed_payloads() {
    let pages = MapExtractor::new()
        .page("https://a.example/empty", ExtractionOutcome::success("{\"content\": \"\"}"))
        .page("https://a.example/none", ExtractionOutcome::success("[{\"title\": \"x\"}]"))
        .page("https://a.example/bad", ExtractionOutcome::success("<html>not json"));
    let (extractor, _) = extractor_with(pages, 2);

    let contents = extractor
        .extract(
            &links(&["https://a.example/empty", "https://a.example/none", "https://a.example/bad"]),
            &[]
        ).await;

    assert_eq!(contents[0].status, ContentStatus::Empty);
    assert_eq!(contents[1].status, ContentStatus::Empty);
    assert_eq!(contents[2].status, ContentStatus::Failed);
    assert!(contents.iter().all(|c| c.text.is_empty()));
}

#[tokio::test]
async fn test_empty_url_is_recorded_as_failed() {
    let (extractor, pages) = extractor_with(MapExtractor::new(), 2);
    let link = ArticleLink { url: String::new(), title: "t".to_string(), domain: String::new() };

    let contents = extractor.extract(&[link], &[]).await;
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].status, ContentStatus::Failed);
    assert_eq!(pages.max_concurrency(), 0);
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let urls: Vec<String> = (0..10).map(|i| format!("https://site{}.example/", i)).collect();
    let mut pages = MapExtractor::new();
    for url in &urls {
        pages = pages.page(url, content_payload("text")).delayed(url, Duration::from_millis(20));
    }
    let (extractor, pages) = extractor_with(pages, 3);

    let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    let contents = extractor.extract(&links(&url_refs), &[]).await;

    assert_eq!(contents.len(), 10);
    assert!(contents.iter().all(|c| c.status == ContentStatus::Ok));
    let peak = pages.max_concurrency();
    assert!(peak <= 3, "peak concurrency {}", peak);
    assert!(peak > 1, "links were not processed concurrently");
}

#[tokio::test]
async fn test_instruction_mentions_keywords() {
    let (extractor, pages) = extractor_with(
        MapExtractor::new().page("https://a.example/", content_payload("x")),
        1
    );
    extractor.extract(&links(&["https://a.example/"]), &["sea level".to_string()]).await;

    let instructions = pages.instructions.lock().unwrap();
    assert!(instructions[0].contains("sea level"));
}

#[tokio::test]
async fn test_deadline_abandons_slow_links() {
    let pages = MapExtractor::new()
        .page("https://fast.example/", content_payload("quick"))
        .page("https://slow.example/", content_payload("too late"))
        .delayed("https://slow.example/", Duration::from_secs(5));
    let (extractor, _) = extractor_with(pages, 2);

    let deadline = tokio::time::Instant::now() + Duration::from_millis(200);
    let contents = extractor
        .extract_until(&links(&["https://fast.example/", "https://slow.example/"]), &[], Some(deadline)).await;

    assert_eq!(contents[0].status, ContentStatus::Ok);
    assert_eq!(contents[1].status, ContentStatus::Failed);
    assert_eq!(contents[1].error.as_deref(), Some("deadline exceeded"));
}

#[test]
fn test_interpret_payload_shapes() {
    assert_eq!(interpret_payload("{\"content\": \" body \"}"), Ok(Some("body".to_string())));
    assert_eq!(
        interpret_payload("[{\"content\": \"one\"}, {\"content\": \"\"}, {\"content\": \"two\"}]"),
        Ok(Some("one\ntwo".to_string()))
    );
    assert_eq!(interpret_payload("[]"), Ok(None));
    assert_eq!(interpret_payload("\"just a string\""), Ok(None));
    assert!(interpret_payload("not json").is_err());
}

#[test]
fn test_chunk_text_overlaps() {
    let text = (1..=25).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
    let chunks = chunk_text(&text, 10, 0.2);

    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].starts_with("1 2") && chunks[0].ends_with("9 10"));
    // next chunk repeats the last two words of the previous one
    assert!(chunks[1].starts_with("9 10 11"));
    assert!(chunks[2].ends_with("25"));
}

#[test]
fn test_chunk_text_short_and_empty() {
    assert_eq!(chunk_text("a b c", 1200, 0.1), vec!["a b c".to_string()]);
    assert!(chunk_text("   ", 1200, 0.1).is_empty());
}

#[test]
fn test_main_text_skips_boilerplate() {
    let html = r#"<html><head><title>Site</title><script>var x = 1;</script></head>
<body>
  <nav><a href="/">Home</a> <a href="/news">News</a></nav>
  <header>Breaking banner</header>
  <article>
    <h1>Water boils at 100 C</h1>
    <p>At sea level, pure water boils at 100 degrees Celsius.</p>
    <aside>Related: subscribe now</aside>
  </article>
  <footer>Copyright</footer>
</body></html>"#;

    let text = main_text(html);
    assert!(text.contains("Water boils at 100 C"));
    assert!(text.contains("pure water boils at 100 degrees Celsius"));
    assert!(!text.contains("Home"));
    assert!(!text.contains("subscribe"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains("var x"));
}

#[test]
fn test_main_text_without_article_uses_body() {
    let html = "<html><body><nav>Menu</nav><div><p>Plain page text.</p></div></body></html>";
    assert_eq!(main_text(html), "Plain page text.");
}

fn chunks(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

fn chunk_model() -> Arc<ScriptedModel> {
    ScriptedModel::new(|prompt| {
        if prompt.contains("first part") {
            Ok("```json\n{\"content\": \"first\"}\n```".to_string())
        } else if prompt.contains("second part") {
            Ok("[{\"content\": \"second\"}, {\"content\": \"third\"}]".to_string())
        } else if prompt.contains("garbled part") {
            Ok("I could not find any article here.".to_string())
        } else {
            Err(ClientError::Http { status: 429, message: "rate limited".to_string() })
        }
    })
}

#[tokio::test]
async fn test_chunk_answers_merge_into_one_payload() {
    let model = chunk_model();
    let pages = LlmPageExtractor::new(model.clone(), &CheckerConfig::default()).unwrap();

    let outcome = pages.extract_chunks(
        "https://a.example",
        &chunks(&["first part", "second part"]),
        &content_schema(),
        "Extract the article"
    ).await;

    assert!(outcome.success);
    assert_eq!(model.call_count(), 2);
    assert_eq!(interpret_payload(&outcome.extracted_payload).unwrap().unwrap(), "first\nsecond\nthird");
}

#[tokio::test]
async fn test_partial_chunk_failure_is_still_success() {
    let pages = LlmPageExtractor::new(chunk_model(), &CheckerConfig::default()).unwrap();

    let outcome = pages.extract_chunks(
        "https://a.example",
        &chunks(&["first part", "garbled part", "dropped part"]),
        &content_schema(),
        "Extract the article"
    ).await;

    assert!(outcome.success);
    assert_eq!(interpret_payload(&outcome.extracted_payload).unwrap().unwrap(), "first");
}

#[tokio::test]
async fn test_every_chunk_failing_is_a_failure() {
    let pages = LlmPageExtractor::new(chunk_model(), &CheckerConfig::default()).unwrap();

    let outcome = pages.extract_chunks(
        "https://a.example",
        &chunks(&["garbled part", "dropped part"]),
        &content_schema(),
        "Extract the article"
    ).await;

    assert!(!outcome.success);
    assert!(outcome.error.contains("429"));
}

#[tokio::test]
async fn test_page_without_text_extracts_as_empty() {
    let model = chunk_model();
    let pages = LlmPageExtractor::new(model.clone(), &CheckerConfig::default()).unwrap();

    let outcome = pages.extract_chunks("https://a.example", &[], &content_schema(), "Extract").await;

    assert!(outcome.success);
    assert_eq!(outcome.extracted_payload, "[]");
    assert_eq!(model.call_count(), 0);
    assert_eq!(interpret_payload(&outcome.extracted_payload), Ok(None));
}
