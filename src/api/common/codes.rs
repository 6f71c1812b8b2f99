//
//  twapi-client
//  api/common/codes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Known numeric API error codes.
//!
//! Used by [`Non2XXError::summary`](super::Non2XXError::summary) to render
//! `errorTextN` / `errorDescriptionN`. The table is fixed; log parsers rely
//! on the exact wording.

/// Text and description of a known error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCodeDetail {
    /// Short text.
    pub text: &'static str,
    /// Longer description.
    pub description: &'static str,
}

impl ErrorCodeDetail {
    /// Placeholder for codes missing from the table.
    pub const UNKNOWN: Self = Self::new("unknown", "unknown");

    const fn new(text: &'static str, description: &'static str) -> Self {
        Self { text, description }
    }
}

/// Looks up a numeric error code.
///
/// # Example
///
/// ```rust
/// use twapi_client::api::common::error_code_detail;
///
/// assert_eq!(error_code_detail(88).unwrap().text, "Rate limit exceeded");
/// assert!(error_code_detail(-1).is_none());
/// ```
pub fn error_code_detail(code: i64) -> Option<ErrorCodeDetail> {
    let detail = match code {
        3 => ErrorCodeDetail::new(
            "Invalid coordinates.",
            "Corresponds with HTTP 400. The coordinates provided as parameters were not valid for the request.",
        ),
        13 => ErrorCodeDetail::new(
            "No location associated with the specified IP address.",
            "Corresponds with HTTP 404. It was not possible to derive a location for the IP address provided as a parameter on the geo search request.",
        ),
        17 => ErrorCodeDetail::new(
            "No user matches for specified terms.",
            "Corresponds with HTTP 404. It was not possible to find a user profile matching the parameters specified.",
        ),
        32 => ErrorCodeDetail::new(
            "Could not authenticate you.",
            "Corresponds with HTTP 401. There was an issue with the authentication data for the request.",
        ),
        34 => ErrorCodeDetail::new(
            "Sorry, that page does not exist.",
            "Corresponds with HTTP 404. The specified resource was not found.",
        ),
        36 => ErrorCodeDetail::new(
            "You cannot report yourself for spam.",
            "Corresponds with HTTP 403. You cannot use your own user ID in a report spam call.",
        ),
        38 => ErrorCodeDetail::new(
            "<named> parameter is missing.",
            "Corresponds with HTTP 403. The request is missing the <named> parameter (such as media, text, etc.) in the request.",
        ),
        44 => ErrorCodeDetail::new(
            "attachment_url parameter is invalid.",
            "Corresponds with HTTP 400. The URL value provided is not a URL that can be attached to this Tweet.",
        ),
        50 => ErrorCodeDetail::new(
            "User not found.",
            "Corresponds with HTTP 404. The user is not found.",
        ),
        63 => ErrorCodeDetail::new(
            "User has been suspended.",
            "Corresponds with HTTP 403. The user account has been suspended and information cannot be retrieved.",
        ),
        64 => ErrorCodeDetail::new(
            "Your account is suspended and is not permitted to access this feature.",
            "Corresponds with HTTP 403. The access token being used belongs to a suspended user.",
        ),
        68 => ErrorCodeDetail::new(
            "The Twitter REST API v1 is no longer active. Please migrate to API v1.1.",
            "Corresponds to a HTTP request to a retired v1-era URL.",
        ),
        87 => ErrorCodeDetail::new(
            "Client is not permitted to perform this action.",
            "Corresponds with HTTP 403. The endpoint called is not a permitted URL.",
        ),
        88 => ErrorCodeDetail::new(
            "Rate limit exceeded",
            "The request limit for this resource has been reached for the current rate limit window.",
        ),
        89 => ErrorCodeDetail::new(
            "Invalid or expired token.",
            "The access token used in the request is incorrect or has expired.",
        ),
        92 => ErrorCodeDetail::new(
            "SSL is required",
            "Only SSL connections are allowed in the API. Update the request to a secure connection.",
        ),
        93 => ErrorCodeDetail::new(
            "This application is not allowed to access or delete your direct messages.",
            "Corresponds with HTTP 403. The OAuth token does not provide access to Direct Messages.",
        ),
        99 => ErrorCodeDetail::new(
            "Unable to verify your credentials.",
            "Corresponds with HTTP 403. The OAuth credentials cannot be validated. Check that the token is still valid.",
        ),
        120 => ErrorCodeDetail::new(
            "Account update failed: value is too long (maximum is nn characters).",
            "Corresponds with HTTP 403. Thrown when one of the values passed to the update_profile.json endpoint exceeds the maximum value currently permitted for that field.",
        ),
        130 => ErrorCodeDetail::new(
            "Over capacity",
            "Corresponds with HTTP 503. The service is temporarily over-capacity.",
        ),
        131 => ErrorCodeDetail::new(
            "Internal error",
            "Corresponds with HTTP 500. An unknown internal error occurred.",
        ),
        135 => ErrorCodeDetail::new(
            "Could not authenticate you.",
            "Corresponds with HTTP 401. Timestamp out of bounds (often caused by a clock drift when authenticating).",
        ),
        139 => ErrorCodeDetail::new(
            "You have already favorited this status.",
            "Corresponds with HTTP 403. A Tweet cannot be favorited (liked) more than once.",
        ),
        144 => ErrorCodeDetail::new(
            "No status found with that ID.",
            "Corresponds with HTTP 404. The requested Tweet ID is not found (if it existed, it was probably deleted).",
        ),
        150 => ErrorCodeDetail::new(
            "You cannot send messages to users who are not following you.",
            "Corresponds with HTTP 403. Sending a Direct Message failed.",
        ),
        151 => ErrorCodeDetail::new(
            "There was an error sending your message: reason",
            "Corresponds with HTTP 403. Sending a Direct Message failed. The reason value will provide more information.",
        ),
        160 => ErrorCodeDetail::new(
            "You've already requested to follow user.",
            "Corresponds with HTTP 403. This was a duplicated follow request and a previous request was not yet acknowledged.",
        ),
        161 => ErrorCodeDetail::new(
            "You are unable to follow more people at this time.",
            "Corresponds with HTTP 403. Thrown when a user cannot follow another user due to reaching the limit.",
        ),
        179 => ErrorCodeDetail::new(
            "Sorry, you are not authorized to see this status.",
            "Corresponds with HTTP 403. Thrown when a Tweet cannot be viewed by the authenticating user, usually due to the Tweet's author having protected their Tweets.",
        ),
        185 => ErrorCodeDetail::new(
            "User is over daily status update limit.",
            "Corresponds with HTTP 403. Thrown when a Tweet cannot be posted due to the user having no allowance remaining to post.",
        ),
        186 => ErrorCodeDetail::new(
            "Tweet needs to be a bit shorter.",
            "Corresponds with HTTP 403. The status text is too long.",
        ),
        187 => ErrorCodeDetail::new(
            "Status is a duplicate.",
            "The status text has already been Tweeted by the authenticated account.",
        ),
        205 => ErrorCodeDetail::new(
            "You are over the limit for spam reports.",
            "Corresponds with HTTP 403. The account limit for reporting spam has been reached. Try again later.",
        ),
        214 => ErrorCodeDetail::new(
            "Owner must allow dms from anyone.",
            "Corresponds with HTTP 403. The user is not set up to have open Direct Messages when trying to set up a welcome message.",
        ),
        215 => ErrorCodeDetail::new(
            "Bad authentication data.",
            "Corresponds with HTTP 400. The method requires authentication but it was not presented or was wholly invalid.",
        ),
        220 => ErrorCodeDetail::new(
            "Your credentials do not allow access to this resource.",
            "Corresponds with HTTP 403. The authentication token in use is restricted and cannot access the requested resource.",
        ),
        226 => ErrorCodeDetail::new(
            "This request looks like it might be automated. To protect our users from spam and other malicious activity, we can't complete this action right now.",
            "Corresponds with HTTP 403. We constantly monitor and adjust our filters to block spam and malicious activity on the platform.",
        ),
        231 => ErrorCodeDetail::new(
            "User must verify login.",
            "Returned as a challenge in xAuth when the user has login verification enabled on their account and needs to be directed to the site to obtain an application-specific password.",
        ),
        251 => ErrorCodeDetail::new(
            "This endpoint has been retired and should not be used.",
            "Corresponds to HTTP 410. The app made a request to a retired URL.",
        ),
        261 => ErrorCodeDetail::new(
            "Application cannot perform write actions.",
            "Corresponds with HTTP 403. Thrown when the app is restricted from POST, PUT, or DELETE actions.",
        ),
        271 => ErrorCodeDetail::new(
            "You can't mute yourself.",
            "Corresponds with HTTP 403. The authenticated user account cannot mute itself.",
        ),
        272 => ErrorCodeDetail::new(
            "You are not muting the specified user.",
            "Corresponds with HTTP 403. The authenticated user account is not muting the account a call is attempting to unmute.",
        ),
        323 => ErrorCodeDetail::new(
            "Animated GIFs are not allowed when uploading multiple images.",
            "Corresponds with HTTP 400. Only one animated GIF may be attached to a single Tweet.",
        ),
        324 => ErrorCodeDetail::new(
            "The validation of media ids failed.",
            "Corresponds with HTTP 400. There was a problem with the media ID submitted with the Tweet.",
        ),
        325 => ErrorCodeDetail::new(
            "A media id was not found.",
            "Corresponds with HTTP 400. The media ID attached to the Tweet was not found.",
        ),
        326 => ErrorCodeDetail::new(
            "To protect our users from spam and other malicious activity, this account is temporarily locked.",
            "Corresponds with HTTP 403. The user should log in to the site to unlock their account before the user context can be used.",
        ),
        327 => ErrorCodeDetail::new(
            "You have already retweeted this Tweet.",
            "Corresponds with HTTP 403. The user cannot retweet the same Tweet more than once.",
        ),
        349 => ErrorCodeDetail::new(
            "You cannot send messages to this user.",
            "Corresponds with HTTP 403. The sender does not have privileges to Direct Message the recipient.",
        ),
        354 => ErrorCodeDetail::new(
            "The text of your direct message is over the max character limit.",
            "Corresponds with HTTP 403. The message size exceeds the number of characters permitted in a Direct Message.",
        ),
        355 => ErrorCodeDetail::new(
            "Subscription already exists.",
            "Corresponds with HTTP 409 Conflict. The subscription already exists for this webhook.",
        ),
        385 => ErrorCodeDetail::new(
            "You attempted to reply to a Tweet that is deleted or not visible to you.",
            "Corresponds with HTTP 403. A reply can only be sent with reference to an existing public Tweet.",
        ),
        386 => ErrorCodeDetail::new(
            "The Tweet exceeds the number of allowed attachment types.",
            "Corresponds with HTTP 403. A Tweet is limited to a single attachment resource (media, Quote Tweet, etc.).",
        ),
        407 => ErrorCodeDetail::new(
            "The given URL is invalid.",
            "Corresponds with HTTP 400. A URL included in the Tweet could not be handled.",
        ),
        415 => ErrorCodeDetail::new(
            "Callback URL not approved for this client application. Approved callback URLs can be adjusted in your application settings.",
            "Corresponds with HTTP 403. The app callback URLs must be allowlisted via the app details page in the developer portal.",
        ),
        416 => ErrorCodeDetail::new(
            "Invalid / suspended application",
            "Corresponds with HTTP 401. The app has been suspended and cannot be used with Sign-in with Twitter.",
        ),
        421 => ErrorCodeDetail::new(
            "This Tweet is no longer available.",
            "Corresponds with HTTP 404. The Tweet cannot be retrieved.",
        ),
        422 => ErrorCodeDetail::new(
            "This Tweet is no longer available because it violated the Twitter Rules.",
            "Corresponds with HTTP 404. The Tweet cannot be retrieved.",
        ),
        433 => ErrorCodeDetail::new(
            "The original Tweet author restricted who can reply to this Tweet.",
            "Corresponds with HTTP 403. The authenticated user is not permitted to reply to this Tweet.",
        ),
        _ => return None,
    };
    Some(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(error_code_detail(32).unwrap().text, "Could not authenticate you.");
        assert_eq!(error_code_detail(187).unwrap().text, "Status is a duplicate.");
        assert!(error_code_detail(131).unwrap().description.contains("HTTP 500"));
    }

    #[test]
    fn test_unknown_code() {
        assert!(error_code_detail(0).is_none());
        assert!(error_code_detail(12345).is_none());
        assert_eq!(ErrorCodeDetail::UNKNOWN.text, "unknown");
    }
}
