//! Fixture pages and a mock listing site shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use vidbridge::{BridgeConfig, SiteClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Listing page with three well-formed tiles and one without a link.
pub fn listing_page() -> String {
    r#"<!DOCTYPE html>
<html><body>
<div id="list_videos_latest_videos_list_items">
  <div class="item">
    <a href="/es/videos/1001/first-video/" title="First video">
      <img class="thumb lazy-load" data-src="/contents/1001/preview.jpg" src="data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP" alt="First alt">
    </a>
  </div>
  <div class="item">
    <div class="no-link">Sponsored</div>
    <img src="/ads/banner.jpg" alt="Ad">
  </div>
  <div class="item">
    <a href="/es/videos/1002/second-video/">
      <img src="/contents/1002/preview.jpg" alt="Second video">
    </a>
  </div>
  <div class="item">
    <a href="/es/videos/1003/third-video/" title="Third video"></a>
  </div>
</div>
</body></html>"#
        .to_string()
}

/// Item page with two `<source>` tags, 480p first.
pub fn item_with_sources(base: &str) -> String {
    format!(
        r#"<html><body>
<video id="player">
  <source src="{base}/get_file/1/aa/1000/1001/1001_480p.mp4/" type="video/mp4" label="480p">
  <source src="{base}/get_file/1/bb/1000/1001/1001_720p.mp4/" type="video/mp4" label="720p">
</video>
</body></html>"#
    )
}

/// Item page whose only stream hint is a JSON-LD `embedUrl`.
pub fn item_with_ld_json(embed_url: &str) -> String {
    format!(
        r#"<html><head>
<script type="application/ld+json">
{{"@context":"https://schema.org","@type":"VideoObject","name":"Fixture","embedUrl":"{embed_url}"}}
</script>
</head><body><div class="player-holder"></div></body></html>"#
    )
}

/// Embed player page whose flashvars declare 480p and 720p files.
pub fn embed_with_flashvars(base: &str) -> String {
    format!(
        r"<html><body><div id='kt_player'></div>
<script>
var flashvars = {{
  video_id: '4242',
  video_alt_url: '{base}/get_file/1/cc/4000/4242/4242_480p.mp4/',
  video_alt_url_text: '480p',
  video_alt_url2: '{base}/get_file/1/dd/4000/4242/4242_720p.mp4/',
  video_alt_url2_text: '720p',
  skin: 'default'
}};
kt_player('kt_player', '/player/kt_player.swf', '100%', '100%', flashvars);
</script></body></html>"
    )
}

/// Embed page without any player configuration.
pub fn embed_without_flashvars() -> String {
    "<html><body><iframe src=\"/player/new\"></iframe></body></html>".to_string()
}

pub async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Config pointing at `<mock>/es/` with short timeouts.
pub fn config_for(server: &MockServer) -> BridgeConfig {
    let mut config = BridgeConfig::for_target(&format!("{}/es/", server.uri()));
    config.fetch_timeout_secs = 1;
    config.connect_timeout_secs = 1;
    config
}

pub fn client_for(config: &BridgeConfig) -> Arc<SiteClient> {
    Arc::new(SiteClient::new(config).expect("client should build"))
}
