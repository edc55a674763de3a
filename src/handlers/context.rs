use crate::config::Config;
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub struct RequestContext<'a> {
    pub client: &'a reqwest::Client,
    pub config: &'a Config,
}

impl<'a> RequestContext<'a> {
    pub fn upstream(&self) -> UpstreamClient<'a> {
        UpstreamClient::new(
            self.client,
            &self.config.upstream_url,
            &self.config.api_key,
            self.config.request_timeout(),
        )
    }
}
