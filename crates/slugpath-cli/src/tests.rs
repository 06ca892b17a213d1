use super::*;
use std::fs;
use tempfile::TempDir;

const PAGES: &str = r#"[
    {"id": "home", "slug": "home"},
    {"id": "blog", "slug": "blog", "parent": "home"},
    {"id": "post", "slug": "hello-world", "parent": "blog"},
    {"id": "orphan", "slug": "orphan", "parent": "deleted"}
]"#;

fn setup() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pages.json");
    fs::write(&path, PAGES).unwrap();
    (temp_dir, path)
}

fn run_cli(args: &[&str]) -> (anyhow::Result<()>, String) {
    let cli = Cli::try_parse_from(std::iter::once("slugpath").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mut out = Vec::new();
    let result = run(&cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_resolve_single_page() {
    let (_temp_dir, path) = setup();
    let (result, out) = run_cli(&[path.to_str().unwrap(), "post"]);

    result.unwrap();
    assert_eq!(out, "/home/blog/hello-world\n");
}

#[test]
fn test_dangling_parent_is_lenient_by_default() {
    let (_temp_dir, path) = setup();
    let (result, out) = run_cli(&[path.to_str().unwrap(), "orphan", "--debug"]);

    result.unwrap();
    assert!(out.starts_with("/orphan\n"));
    assert!(out.contains("  chain: orphan\n"));
    assert!(out.contains("anomaly: page orphan references parent deleted"));
}

#[test]
fn test_strict_flag_fails() {
    let (_temp_dir, path) = setup();
    let (result, out) = run_cli(&[path.to_str().unwrap(), "orphan", "--strict"]);

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("not in the collection"));
    assert!(out.is_empty());
}

#[test]
fn test_all_pages_with_ids() {
    let (_temp_dir, path) = setup();
    let (result, out) = run_cli(&[path.to_str().unwrap(), "--all"]);

    result.unwrap();
    assert_eq!(
        out,
        "home\t/home\nblog\t/home/blog\npost\t/home/blog/hello-world\norphan\t/orphan\n"
    );
}

#[test]
fn test_all_pages_strict_reports_failures() {
    let (_temp_dir, path) = setup();
    let (result, out) = run_cli(&[path.to_str().unwrap(), "--all", "--strict"]);

    assert!(result.unwrap_err().to_string().contains("1 pages"));
    assert!(!out.contains("orphan"));
    assert!(out.contains("post\t/home/blog/hello-world"));
}

#[test]
fn test_json_output() {
    let (_temp_dir, path) = setup();
    let (result, out) = run_cli(&[path.to_str().unwrap(), "blog", "--format", "json"]);

    result.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["id"], "blog");
    assert_eq!(value["path"], "/home/blog");
    assert_eq!(value["segments"], serde_json::json!(["home", "blog"]));
    assert_eq!(value["complete"], true);
    assert!(value.get("chain").is_none());
}

#[test]
fn test_lines_output_with_descendants() {
    let (_temp_dir, path) = setup();
    let (result, out) = run_cli(&[
        path.to_str().unwrap(),
        "blog",
        "--descendants",
        "--format",
        "lines",
    ]);

    result.unwrap();
    assert_eq!(out, "# blog\nhome\nblog\n\n# post\nhome\nblog\nhello-world\n");
}

#[test]
fn test_write_back_merges_existing_fields() {
    let (temp_dir, path) = setup();
    let store = temp_dir.path().join("paths.json");
    fs::write(&store, r#"{"other": ["x"]}"#).unwrap();

    let (result, _) = run_cli(&[
        path.to_str().unwrap(),
        "post",
        "--write",
        store.to_str().unwrap(),
    ]);
    result.unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(
        saved,
        serde_json::json!({
            "other": ["x"],
            "post": ["home", "blog", "hello-world"]
        })
    );
}

#[test]
fn test_config_file_and_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let pages = temp_dir.path().join("entries.json");
    fs::write(
        &pages,
        r#"[
            {"sys": {"id": "a"}, "fields": {"slug": {"en-US": "About Us"}}},
            {"sys": {"id": "b"}, "fields": {"slug": {"en-US": "Team"}, "parent": {"en-US": {"sys": {"id": "a"}}}}}
        ]"#,
    )
    .unwrap();
    let config = temp_dir.path().join("slugpath.yaml");
    fs::write(
        &config,
        "entry:\n  locale: en-US\nformat:\n  trailing: true\n",
    )
    .unwrap();

    let (result, out) = run_cli(&[
        pages.to_str().unwrap(),
        "b",
        "--config",
        config.to_str().unwrap(),
        "--normalize",
    ]);

    result.unwrap();
    assert_eq!(out, "/about-us/team/\n");
}

#[test]
fn test_unknown_page() {
    let (_temp_dir, path) = setup();
    let (result, _) = run_cli(&[path.to_str().unwrap(), "missing"]);
    assert!(format!("{:#}", result.unwrap_err()).contains("page missing not found"));
}

#[test]
fn test_requires_id_or_all() {
    assert!(Cli::try_parse_from(["slugpath", "pages.json"]).is_err());
    assert!(Cli::try_parse_from(["slugpath", "pages.json", "a", "--all"]).is_err());
    assert!(Cli::try_parse_from(["slugpath", "pages.json", "--all", "--descendants"]).is_err());
}
