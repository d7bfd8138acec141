use std::os::raw::c_long;
use std::time::Duration;

use anyhow::anyhow;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, REFERER, USER_AGENT,
};
use reqwest::{redirect, Client, Method, Proxy, Request, StatusCode};
use url::Url;

use crate::coerce::{ArgKind, OptionArg};
use crate::handle::{HandleError, TransferHandle};
use crate::options;
use crate::resolve::OptionId;
use crate::Result;

/// Redirect limit when following redirects without `MAXREDIRS`.
pub const DEFAULT_MAX_REDIRECTS: usize = 30;

/// An HTTP transfer configured through option codes.
///
/// Only the options listed in [`crate::options`] are understood, every
/// other code is rejected. Proxies are used only when set through
/// [`options::PROXY`]; the environment is not consulted.
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    url: Option<Url>,
    method: Method,
    headers: HeaderMap,
    body: Option<String>,
    credentials: Option<(String, Option<String>)>,
    follow_location: bool,
    max_redirects: Option<c_long>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    proxy: Option<String>,
    verify_peer: bool,
    verbose: bool,
}

/// Outcome of a transfer performed with [`HttpTransfer::perform_sync`].
#[derive(Debug, Clone)]
pub struct Completed {
    pub status: StatusCode,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Default for HttpTransfer {
    fn default() -> Self {
        Self {
            url: None,
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            credentials: None,
            follow_location: false,
            max_redirects: None,
            timeout: None,
            connect_timeout: None,
            proxy: None,
            verify_peer: true,
            verbose: false,
        }
    }
}

impl HttpTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn follows_redirects(&self) -> bool {
        self.follow_location
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn verifies_peer(&self) -> bool {
        self.verify_peer
    }

    /// Build a client carrying the connection-level settings.
    pub fn client(&self) -> Result<Client> {
        let redirects = if !self.follow_location {
            redirect::Policy::none()
        } else {
            match self.max_redirects.map(usize::try_from) {
                Some(Ok(limit)) => redirect::Policy::limited(limit),
                // negative means unlimited
                Some(Err(_)) => redirect::Policy::limited(usize::MAX),
                None => redirect::Policy::limited(DEFAULT_MAX_REDIRECTS),
            }
        };

        let mut builder = Client::builder()
            .redirect(redirects)
            .danger_accept_invalid_certs(!self.verify_peer)
            .connection_verbose(self.verbose);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder = match &self.proxy {
            Some(proxy) => builder.proxy(Proxy::all(proxy.as_str())?),
            None => builder.no_proxy(),
        };
        Ok(builder.build()?)
    }

    /// Build the request this transfer would send.
    pub fn request(&self, client: &Client) -> Result<Request> {
        let url = self
            .url
            .clone()
            .ok_or_else(|| anyhow!("No URL set on the transfer"))?;

        let mut request = client
            .request(self.method.clone(), url)
            .headers(self.headers.clone());
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }
        if let Some(body) = &self.body {
            request = request.body(body.clone());
        }
        Ok(request.build()?)
    }

    pub async fn perform(&self) -> Result<reqwest::Response> {
        let client = self.client()?;
        let request = self.request(&client)?;
        log::debug!("Performing {} {}", request.method(), request.url());

        Ok(client.execute(request).await?)
    }

    /// Synchronized version of [`HttpTransfer::perform`],
    /// reading the whole response body.
    pub fn perform_sync(&self) -> Result<Completed> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let response = self.perform().await?;
            let status = response.status();
            let url = response.url().clone();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            log::debug!("{} answered {} ({} bytes)", url, status, body.len());

            Ok(Completed {
                status,
                url,
                headers,
                body,
            })
        })
    }

    fn set_header(
        &mut self,
        option: OptionId,
        name: HeaderName,
        arg: OptionArg<'_>,
    ) -> std::result::Result<(), HandleError> {
        let value = HeaderValue::from_str(expect_str(option, arg)?)
            .map_err(|err| invalid(option, err))?;
        self.headers.insert(name, value);
        Ok(())
    }
}

impl TransferHandle for HttpTransfer {
    fn set_option(
        &mut self,
        option: OptionId,
        arg: OptionArg<'_>,
    ) -> std::result::Result<(), HandleError> {
        log::trace!("Setting option {} to {:?}", option, arg);

        match option {
            options::URL => {
                let url = Url::parse(expect_str(option, arg)?)
                    .map_err(|err| invalid(option, err))?;
                self.url = Some(url);
            }
            options::PROXY => {
                let proxy = expect_str(option, arg)?;
                Proxy::all(proxy).map_err(|err| invalid(option, err))?;
                self.proxy = Some(proxy.to_owned());
            }
            options::USERPWD => {
                let text = expect_str(option, arg)?;
                self.credentials = Some(match text.split_once(':') {
                    Some((user, password)) => {
                        (user.to_owned(), Some(password.to_owned()))
                    }
                    None => (text.to_owned(), None),
                });
            }
            options::POSTFIELDS | options::COPYPOSTFIELDS => {
                self.body = Some(expect_str(option, arg)?.to_owned());
                if self.method == Method::GET || self.method == Method::HEAD {
                    self.method = Method::POST;
                }
            }
            options::REFERER => self.set_header(option, REFERER, arg)?,
            options::USERAGENT => self.set_header(option, USER_AGENT, arg)?,
            options::ACCEPT_ENCODING => {
                self.set_header(option, ACCEPT_ENCODING, arg)?
            }
            options::CUSTOMREQUEST => {
                self.method =
                    Method::from_bytes(expect_str(option, arg)?.as_bytes())
                        .map_err(|err| invalid(option, err))?;
            }
            options::TIMEOUT => {
                self.timeout = duration(option, arg, Duration::from_secs)?
            }
            options::TIMEOUT_MS => {
                self.timeout = duration(option, arg, Duration::from_millis)?
            }
            options::CONNECTTIMEOUT => {
                self.connect_timeout =
                    duration(option, arg, Duration::from_secs)?
            }
            options::CONNECTTIMEOUT_MS => {
                self.connect_timeout =
                    duration(option, arg, Duration::from_millis)?
            }
            options::MAXREDIRS => {
                self.max_redirects = Some(expect_long(option, arg)?)
            }
            options::FOLLOWLOCATION => {
                self.follow_location = expect_flag(option, arg)?
            }
            options::SSL_VERIFYPEER => {
                self.verify_peer = expect_flag(option, arg)?
            }
            options::VERBOSE => self.verbose = expect_flag(option, arg)?,
            options::POST => {
                if expect_flag(option, arg)? {
                    self.method = Method::POST;
                }
            }
            options::HTTPGET => {
                if expect_flag(option, arg)? {
                    self.method = Method::GET;
                    self.body = None;
                }
            }
            options::NOBODY => {
                if expect_flag(option, arg)? {
                    self.method = Method::HEAD;
                } else if self.method == Method::HEAD {
                    self.method = Method::GET;
                }
            }
            _ => return Err(HandleError::UnknownOption(option)),
        }
        Ok(())
    }
}

fn invalid<E: std::fmt::Display>(option: OptionId, err: E) -> HandleError {
    HandleError::InvalidValue {
        option,
        reason: err.to_string(),
    }
}

fn mismatch(
    option: OptionId,
    expected: ArgKind,
    arg: OptionArg<'_>,
) -> HandleError {
    HandleError::ArgumentMismatch {
        option,
        expected,
        found: arg.kind(),
    }
}

fn expect_str<'a>(
    option: OptionId,
    arg: OptionArg<'a>,
) -> std::result::Result<&'a str, HandleError> {
    match arg {
        OptionArg::Str(text) => Ok(text),
        other => Err(mismatch(option, ArgKind::Str, other)),
    }
}

fn expect_long(
    option: OptionId,
    arg: OptionArg<'_>,
) -> std::result::Result<c_long, HandleError> {
    match arg {
        OptionArg::Long(number) => Ok(number),
        other => Err(mismatch(option, ArgKind::Long, other)),
    }
}

/// On/off options take either a boolean or a long, non-zero meaning on.
fn expect_flag(
    option: OptionId,
    arg: OptionArg<'_>,
) -> std::result::Result<bool, HandleError> {
    match arg {
        OptionArg::Bool(flag) => Ok(flag),
        OptionArg::Long(number) => Ok(number != 0),
        other => Err(mismatch(option, ArgKind::Bool, other)),
    }
}

/// Zero disables the timeout.
fn duration(
    option: OptionId,
    arg: OptionArg<'_>,
    unit: fn(u64) -> Duration,
) -> std::result::Result<Option<Duration>, HandleError> {
    let amount = expect_long(option, arg)?;
    let amount = u64::try_from(amount).map_err(|err| invalid(option, err))?;
    Ok((amount > 0).then(|| unit(amount)))
}
