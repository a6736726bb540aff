//! One GET attempt through libcurl.

use super::{FetchRequest, HttpOptions};
use crate::cancel::CancelToken;
use crate::retry::FetchError;

/// Performs a single GET with the given user-agent and the request's proxy.
/// The transfer is aborted from the progress callback once `cancel` is set.
pub(super) fn get_once(
    request: &FetchRequest,
    user_agent: &str,
    http: &HttpOptions,
    cancel: &CancelToken,
) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(request.url())?;
    easy.useragent(user_agent)?;
    if let Some(proxy) = request.proxy() {
        // CURLOPT_PROXY covers both http:// and https:// targets.
        easy.proxy(proxy)?;
    }
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(http.connect_timeout)?;
    if http.low_speed_limit > 0 {
        easy.low_speed_limit(http.low_speed_limit)?;
        easy.low_speed_time(http.low_speed_time)?;
    }
    easy.timeout(http.timeout)?;
    easy.progress(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
        if let Err(e) = transfer.perform() {
            if e.is_aborted_by_callback() || cancel.is_cancelled() {
                return Err(FetchError::Interrupted);
            }
            return Err(FetchError::Transport(e));
        }
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::HttpStatus(code));
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}
