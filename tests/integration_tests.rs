//! Integration tests for Paper Fetcher
//!
//! These tests run the full pipeline against a local mock of the E-utilities API.

use mockito::{Matcher, Server, ServerGuard};
use paper_fetcher::classify::AffiliationClassifier;
use paper_fetcher::config::{Config, PubMedConfig};
use paper_fetcher::output::{render_rows, write_csv, ConsoleFormat, OutputError};
use paper_fetcher::sources::{PubMedSource, Source};
use paper_fetcher::{PaperFetcher, PaperRow, SearchQuery, SourceError};
use std::sync::Arc;

const USER_AGENT: &str = "PubMedPaperFetcher/1.0";

const RECORD_111: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <Article>
        <Journal><JournalIssue><PubDate><Year>2023</Year><Month>Mar</Month><Day>7</Day></PubDate></JournalIssue></Journal>
        <ArticleTitle>Lipid nanoparticles, revisited</ArticleTitle>
        <AuthorList>
          <Author ValidYN="Y">
            <LastName>Ito</LastName><ForeName>Ken</ForeName>
            <AffiliationInfo><Affiliation>University of Tokyo, Japan</Affiliation></AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Park</LastName><ForeName>Mina</ForeName>
            <AffiliationInfo><Affiliation>Acuitas Therapeutics Inc, Vancouver. mina.park@acuitas.com</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

const RECORD_222: &str = r#"<PubmedArticleSet><PubmedArticle>
  <PubDate><Year>2021</Year></PubDate>
  <AuthorList><Author><LastName>Roe</LastName><ForeName>Sam</ForeName></Author></AuthorList>
</PubmedArticle></PubmedArticleSet>"#;

fn config_for(server: &ServerGuard) -> Config {
    Config {
        pubmed: PubMedConfig {
            search_url: format!("{}/esearch.fcgi", server.url()),
            fetch_url: format!("{}/efetch.fcgi", server.url()),
            ..PubMedConfig::default()
        },
        ..Config::default()
    }
}

fn search_body(ids: &[&str]) -> String {
    serde_json::json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {"count": ids.len().to_string(), "idlist": ids}
    })
    .to_string()
}

async fn mock_search(server: &mut ServerGuard, term: &str, retmax: &str, ids: &[&str]) -> mockito::Mock {
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("term".into(), term.into()),
            Matcher::UrlEncoded("retmode".into(), "json".into()),
            Matcher::UrlEncoded("retmax".into(), retmax.into()),
        ]))
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(ids))
        .create_async()
        .await
}

async fn mock_fetch(server: &mut ServerGuard, id: &str, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), id.into()),
            Matcher::UrlEncoded("retmode".into(), "xml".into()),
        ]))
        .match_header("user-agent", USER_AGENT)
        .with_status(status)
        .with_header("content-type", "text/xml")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

/// Full run: search, one fetch per id, rows in search order
#[tokio::test]
async fn test_get_papers_end_to_end() {
    let mut server = Server::new_async().await;
    let search = mock_search(&mut server, "mrna delivery", "10", &["111", "222"]).await;
    let fetch_111 = mock_fetch(&mut server, "111", 200, RECORD_111).await;
    let fetch_222 = mock_fetch(&mut server, "222", 200, RECORD_222).await;

    let fetcher = PaperFetcher::from_config(&config_for(&server)).unwrap();
    let rows = fetcher
        .get_papers(&SearchQuery::new("mrna delivery"))
        .await
        .unwrap();

    search.assert_async().await;
    fetch_111.assert_async().await;
    fetch_222.assert_async().await;

    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].pubmed_id, "111");
    assert_eq!(rows[0].title, "Lipid nanoparticles, revisited");
    assert_eq!(rows[0].publication_date, "2023-Mar-7");
    assert_eq!(rows[0].non_academic_authors, "Mina Park");
    assert_eq!(
        rows[0].company_affiliations,
        "Acuitas Therapeutics Inc, Vancouver. mina.park@acuitas.com"
    );
    assert_eq!(rows[0].corresponding_email, "mina.park@acuitas.com");

    assert_eq!(rows[1].pubmed_id, "222");
    assert_eq!(rows[1].title, "N/A");
    assert_eq!(rows[1].publication_date, "2021");
    assert_eq!(rows[1].non_academic_authors, "None");
    assert_eq!(rows[1].company_affiliations, "None");
    assert_eq!(rows[1].corresponding_email, "Not found");
}

/// Search never yields more ids than requested
#[tokio::test]
async fn test_search_ids_bounded_by_max_results() {
    let mut server = Server::new_async().await;
    let _search = mock_search(&mut server, "cancer", "3", &["1", "2", "3", "4", "5"]).await;

    let source = PubMedSource::new(config_for(&server).pubmed).unwrap();
    let ids = source
        .search_ids(&SearchQuery::new("cancer").max_results(3))
        .await
        .unwrap();

    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(ids.iter().all(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_search_server_error_is_network_error() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let source = PubMedSource::new(config_for(&server).pubmed).unwrap();
    let result = source.search_ids(&SearchQuery::new("cancer")).await;

    assert!(matches!(result, Err(SourceError::Network(_))));
}

#[tokio::test]
async fn test_search_invalid_json_is_parse_error() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<eSearchResult><IdList/></eSearchResult>")
        .create_async()
        .await;

    let source = PubMedSource::new(config_for(&server).pubmed).unwrap();
    let result = source.search_ids(&SearchQuery::new("cancer")).await;

    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let config = PubMedConfig {
        search_url: "http://127.0.0.1:9/esearch.fcgi".to_string(),
        timeout_secs: Some(5),
        ..PubMedConfig::default()
    };

    let source = PubMedSource::new(config).unwrap();
    let result = source.search_ids(&SearchQuery::new("cancer")).await;

    assert!(matches!(result, Err(SourceError::Network(_))));
}

/// A failed detail fetch aborts the run without touching later ids
#[tokio::test]
async fn test_fetch_failure_aborts_run() {
    let mut server = Server::new_async().await;
    let _search = mock_search(&mut server, "cancer", "10", &["111", "404", "222"]).await;
    let fetch_111 = mock_fetch(&mut server, "111", 200, RECORD_111).await;
    let fetch_404 = mock_fetch(&mut server, "404", 404, "not found").await;
    let fetch_222 = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::UrlEncoded("id".into(), "222".into()))
        .with_body(RECORD_222)
        .expect(0)
        .create_async()
        .await;

    let fetcher = PaperFetcher::from_config(&config_for(&server)).unwrap();
    let result = fetcher.get_papers(&SearchQuery::new("cancer")).await;

    assert!(matches!(result, Err(SourceError::Network(_))));
    fetch_111.assert_async().await;
    fetch_404.assert_async().await;
    fetch_222.assert_async().await;
}

/// Zero hits: file output refuses, console output prints nothing
#[tokio::test]
async fn test_empty_result_outputs() {
    let mut server = Server::new_async().await;
    let _search = mock_search(&mut server, "zzzz", "10", &[]).await;

    let fetcher = PaperFetcher::from_config(&config_for(&server)).unwrap();
    let rows = fetcher.get_papers(&SearchQuery::new("zzzz")).await.unwrap();
    assert!(rows.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let result = write_csv(&rows, &dir.path().join("papers.csv"));
    assert!(matches!(result, Err(OutputError::EmptyInput)));

    let mut console = Vec::new();
    render_rows(&rows, ConsoleFormat::Plain, &mut console).unwrap();
    assert!(console.is_empty());
}

/// Rows written to CSV read back field for field
#[test]
fn test_csv_round_trip() {
    let rows = vec![
        PaperRow {
            pubmed_id: "111".to_string(),
            title: "Vaccines, adjuvants, and \"boosters\"".to_string(),
            publication_date: "2023-Mar-7".to_string(),
            non_academic_authors: "Mina Park, Unknown".to_string(),
            company_affiliations: "Acme Corp, Boston\nUSA".to_string(),
            corresponding_email: "mina.park@acme.com".to_string(),
        },
        PaperRow {
            pubmed_id: "222".to_string(),
            title: "N/A".to_string(),
            publication_date: "2021".to_string(),
            non_academic_authors: "None".to_string(),
            company_affiliations: "None".to_string(),
            corresponding_email: "Not found".to_string(),
        },
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("papers.csv");
    write_csv(&rows, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), PaperRow::HEADERS.to_vec());

    let read: Vec<PaperRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(read, rows);
}

/// Classifier keyword lists can be swapped out
#[tokio::test]
async fn test_custom_industry_keywords() {
    let mut server = Server::new_async().await;
    let _search = mock_search(&mut server, "lnp", "10", &["111"]).await;
    let _fetch = mock_fetch(&mut server, "111", 200, RECORD_111).await;

    let mut config = config_for(&server);
    config.classifier.industry_keywords = vec!["University".to_string()];

    let source = Arc::new(PubMedSource::new(config.pubmed.clone()).unwrap());
    let fetcher = PaperFetcher::new(source, AffiliationClassifier::new(&config.classifier));
    let rows = fetcher.get_papers(&SearchQuery::new("lnp")).await.unwrap();

    assert_eq!(rows[0].non_academic_authors, "Ken Ito");
    assert_eq!(rows[0].company_affiliations, "University of Tokyo, Japan");
}
