use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use scraper::{Html, Selector};
use tracing::{debug, info};
use tracing_unwrap::{OptionExt, ResultExt};

use super::{profile, util};
use crate::Result as CrateResult;

pub async fn html(
    minecraft_dir: &Path,
    file: Option<PathBuf>,
    name: Option<String>,
    mc_version: Option<String>,
) -> CrateResult<()> {
    let pack_name = match name {
        Some(name) => name,
        None => util::prompt_pack_name()?,
    };
    let html_path = match file {
        Some(file) => file,
        None => util::prompt_html_path()?,
    };

    install(minecraft_dir, &html_path, &pack_name, mc_version).await?;

    println!(
        "Mods installed successfully! Launch Minecraft and select the '{}' profile.",
        pack_name.bold().green()
    );
    Ok(())
}

/// Every `<a href>` in the document whose target ends in a recognized mod
/// extension. Anything else on the page is ignored.
fn collect_mod_links(document: &str) -> Vec<String> {
    let anchors = Selector::parse("a").expect_or_log("Anchor selector is invalid");
    let document = Html::parse_document(document);
    document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| util::MOD_EXTENSIONS.iter().any(|ext| href.ends_with(ext)))
        .map(|href| href.to_string())
        .collect()
}

async fn install(
    minecraft_dir: &Path,
    html_path: &Path,
    pack_name: &str,
    mc_version: Option<String>,
) -> CrateResult<()> {
    let document = fs::read_to_string(html_path)?;
    let mod_links = collect_mod_links(&document);
    info!(
        "Found {} mod links in {}",
        mod_links.len(),
        html_path.display()
    );

    let mods_dir = minecraft_dir.join("mods");
    fs::create_dir_all(&mods_dir)?;

    let client = util::build_http_client()?;
    for link in &mod_links {
        let source = Path::new(link);
        if source.is_file() {
            let target = mods_dir.join(
                source
                    .file_name()
                    .expect_or_log("Mod link has no file name"),
            );
            match fs::copy(source, &target) {
                Ok(_) => println!("Mod copied from {} to {}", link, mods_dir.display()),
                Err(e) => eprintln!("{} {}: {}", "Failed to copy mod from".red(), link, e),
            }
        } else if link.starts_with("http://") || link.starts_with("https://") {
            println!("Downloading mod from {}...", link);
            match download_mod(&client, link, &mods_dir).await {
                Ok(file_name) => {
                    println!("Mod {} downloaded successfully!", file_name.bold().green())
                }
                Err(e) => eprintln!("{} {}: {}", "Failed to download mod from".red(), link, e),
            }
        } else {
            eprintln!("Unsupported link type: {}", link.yellow());
        }
    }

    let version = match mc_version {
        Some(version) => version,
        None => util::prompt_mc_version()?,
    };
    profile::update_registry(
        &crate::util::profiles_path(minecraft_dir),
        pack_name,
        &crate::util::absolute_path(minecraft_dir),
        &version,
    )
}

async fn download_mod(
    client: &reqwest::Client,
    link: &str,
    mods_dir: &Path,
) -> CrateResult<String> {
    let file_name = util::file_name_from_url(link)?;
    debug!("Saving {} as {}", link, file_name);
    util::download_file(client, link, &mods_dir.join(&file_name)).await?;
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProfileRegistry;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn collects_only_links_with_mod_extensions() {
        let document = r#"
            <html><body>
                <a href="/files/jei.jar">JEI</a>
                <a href="https://example.com/pack.zip">Pack</a>
                <a href="notes.txt">Notes</a>
                <a>No href at all</a>
                <p>plain text mod.jar</p>
            </body></html>
        "#;
        let links = collect_mod_links(document);
        assert_eq!(
            links,
            vec![
                "/files/jei.jar".to_string(),
                "https://example.com/pack.zip".to_string()
            ]
        );
    }

    #[test]
    fn malformed_markup_is_still_scraped_leniently() {
        // html5ever recovers from broken markup instead of failing, so an
        // unclosed tag soup still yields its anchors.
        let links = collect_mod_links("<a href=\"mod.jar\">broken<div><a href='x.zip'");
        assert_eq!(links, vec!["mod.jar".to_string(), "x.zip".to_string()]);
    }

    #[tokio::test]
    async fn copies_local_mods_and_survives_failed_downloads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken.zip"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let local_mod = dir.path().join("local-mod.jar");
        fs::write(&local_mod, b"local jar").unwrap();

        let html_path = dir.path().join("mods.html");
        fs::write(
            &html_path,
            format!(
                r#"<html><body>
                    <a href="{}">local</a>
                    <a href="{}/broken.zip">broken</a>
                    <a href="readme.txt">readme</a>
                    <a href="ftp://example.com/odd.jar">odd</a>
                </body></html>"#,
                local_mod.display(),
                server.uri()
            ),
        )
        .unwrap();

        let root = dir.path().join("minecraft");
        fs::create_dir_all(&root).unwrap();
        install(&root, &html_path, "Scraped Pack", Some("1.20.1".to_string()))
            .await
            .unwrap();

        // The local file was copied; the dead link and the unsupported link
        // were reported but did not abort the run.
        assert_eq!(
            fs::read(root.join("mods").join("local-mod.jar")).unwrap(),
            b"local jar"
        );
        assert!(!root.join("mods").join("broken.zip").exists());

        let raw = fs::read_to_string(crate::util::profiles_path(&root)).unwrap();
        let registry: ProfileRegistry = serde_json::from_str(&raw).unwrap();
        let entry = &registry.profiles["Scraped Pack"];
        assert_eq!(entry.last_version_id, "1.20.1");
        assert_eq!(
            entry.game_dir,
            crate::util::absolute_path(&root).display().to_string()
        );
    }

    #[tokio::test]
    async fn downloads_linked_mods_into_the_mods_directory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/jei-1.20.1.jar"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jei bytes".as_slice()))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let html_path = dir.path().join("mods.html");
        fs::write(
            &html_path,
            format!(
                r#"<a href="{}/files/jei-1.20.1.jar">JEI</a>"#,
                server.uri()
            ),
        )
        .unwrap();

        let root = dir.path().join("minecraft");
        fs::create_dir_all(&root).unwrap();
        install(&root, &html_path, "Pack", Some("1.20.1".to_string()))
            .await
            .unwrap();

        assert_eq!(
            fs::read(root.join("mods").join("jei-1.20.1.jar")).unwrap(),
            b"jei bytes"
        );
    }

    #[tokio::test]
    async fn unreadable_document_fails_the_run() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("minecraft");
        fs::create_dir_all(&root).unwrap();

        let result = install(
            &root,
            &dir.path().join("does-not-exist.html"),
            "Pack",
            Some("1.20.1".to_string()),
        )
        .await;

        assert!(result.is_err());
        assert!(!crate::util::profiles_path(&root).exists());
    }
}
