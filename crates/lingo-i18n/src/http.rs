//! [`LanguageHints`] for [`http::Request`].

use ::http::Request;

use crate::binding::LanguageHints;

impl<B> LanguageHints for Request<B> {
    /// First value of `name` in the URI query. Values are not
    /// percent-decoded; language tags never need it.
    fn query_param(&self, name: &str) -> Option<String> {
        self.uri().query()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then(|| value.to_owned())
        })
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }
}
