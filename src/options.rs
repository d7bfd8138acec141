//! Codes of the transfer options understood by [`crate::http::HttpTransfer`].
//!
//! The numbering follows libcurl's `CURLOPT_*` values, so documents written
//! for a libcurl easy handle resolve to the same behaviour here.

use crate::resolve::OptionId;

// long-valued options
pub const TIMEOUT: OptionId = OptionId(13);
pub const VERBOSE: OptionId = OptionId(41);
pub const NOBODY: OptionId = OptionId(44);
pub const POST: OptionId = OptionId(47);
pub const FOLLOWLOCATION: OptionId = OptionId(52);
pub const SSL_VERIFYPEER: OptionId = OptionId(64);
pub const MAXREDIRS: OptionId = OptionId(68);
pub const CONNECTTIMEOUT: OptionId = OptionId(78);
pub const HTTPGET: OptionId = OptionId(80);
pub const TIMEOUT_MS: OptionId = OptionId(155);
pub const CONNECTTIMEOUT_MS: OptionId = OptionId(156);

// string-valued options
pub const URL: OptionId = OptionId(10002);
pub const PROXY: OptionId = OptionId(10004);
pub const USERPWD: OptionId = OptionId(10005);
pub const POSTFIELDS: OptionId = OptionId(10015);
pub const REFERER: OptionId = OptionId(10016);
pub const USERAGENT: OptionId = OptionId(10018);
pub const CUSTOMREQUEST: OptionId = OptionId(10036);
pub const ACCEPT_ENCODING: OptionId = OptionId(10102);
pub const COPYPOSTFIELDS: OptionId = OptionId(10165);
