use super::*;

fn base(url: &str) -> Url {
    Url::parse(url).expect("base url should parse")
}

#[test]
fn feed_page_url_without_cursor() {
    let url = FeedClient::feed_page_url(&base("https://i.instagram.com/api/v1/"), 787132, 10, None)
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://i.instagram.com/api/v1/feed/user/787132/?count=10"
    );
}

#[test]
fn feed_page_url_with_cursor() {
    let url = FeedClient::feed_page_url(
        &base("https://i.instagram.com/api/v1/"),
        787132,
        10,
        Some("3141592653589793238_787132"),
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "https://i.instagram.com/api/v1/feed/user/787132/?count=10&max_id=3141592653589793238_787132"
    );
}

#[test]
fn join_url_appends_under_base_path() {
    let url = join_url(&base("http://127.0.0.1:9999/api/v1/"), "accounts/login/").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9999/api/v1/accounts/login/");
}

#[test]
fn join_url_usernameinfo_path() {
    let url = join_url(
        &base("https://i.instagram.com/api/v1/"),
        "users/nintendo_jp/usernameinfo/",
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "https://i.instagram.com/api/v1/users/nintendo_jp/usernameinfo/"
    );
}
