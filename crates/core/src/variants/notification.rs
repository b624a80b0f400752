use super::{f, Check, VariantAttr, VariantSpec};
use crate::fields::Category;

const HOST: VariantAttr = f("host").doc("Host.");
const PORT: VariantAttr = f("port").doc("Port.");
const USE_SSL: VariantAttr = f("useSsl").doc("Use SSL flag.");
const USERNAME: VariantAttr = f("username").doc("Username.");
const PASSWORD: VariantAttr = f("password").doc("Password.");
const API_KEY: VariantAttr = f("apiKey").required().doc("API key.");
const FROM: VariantAttr = f("from").required().doc("From.");
const RECIPIENTS: VariantAttr = f("recipients").required().doc("Recipients.");
const UPDATE_LIBRARY: VariantAttr = f("updateLibrary").doc("Update library flag.");
const NOTIFY: VariantAttr = f("notify").doc("Notification flag.");
const WEBHOOK_URL: VariantAttr = f("webHookUrl")
    .required()
    .check(Check::HttpUrl)
    .doc("Webhook URL.");

const TRAKT_AUTH: [VariantAttr; 4] = [
    f("accessToken").required().doc("Access token."),
    f("refreshToken").doc("Refresh token."),
    f("expires").doc("Token expiration."),
    f("authUser").required().doc("Auth user."),
];

const fn variant(
    kind: &'static str,
    title: &'static str,
    implementation: &'static str,
    config_contract: &'static str,
    attributes: &'static [VariantAttr],
) -> VariantSpec {
    VariantSpec {
        category: Category::Notification,
        kind,
        title,
        implementation,
        config_contract,
        protocol: None,
        attributes,
    }
}

pub(super) static VARIANTS: &[VariantSpec] = &[
    variant(
        "apprise",
        "Apprise",
        "Apprise",
        "AppriseSettings",
        &[
            f("serverUrl").required().check(Check::HttpUrl).doc("Server URL."),
            f("configurationKey").doc("Configuration key."),
            f("statelessUrls").doc("Stateless URLs, comma separated."),
            f("notificationType")
                .check(Check::OneOfInt(&[0, 1, 2, 3]))
                .doc("Notification type. `0` Info, `1` Success, `2` Warning, `3` Failure."),
            f("fieldTags").doc("Tags to notify."),
            f("authUsername").doc("Username."),
            f("authPassword").doc("Password."),
        ],
    ),
    variant(
        "boxcar",
        "Boxcar",
        "Boxcar",
        "BoxcarSettings",
        &[f("token").required().doc("Access token.")],
    ),
    variant(
        "custom_script",
        "Custom Script",
        "CustomScript",
        "CustomScriptSettings",
        &[
            f("path").required().check(Check::AbsolutePath).doc("Script path."),
            f("arguments").doc("Script arguments."),
        ],
    ),
    variant(
        "discord",
        "Discord",
        "Discord",
        "DiscordSettings",
        &[
            WEBHOOK_URL,
            USERNAME,
            f("avatar").doc("Avatar."),
            f("author").doc("Author."),
            f("grabFields")
                .check(Check::OneOfInt(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]))
                .doc("Grab fields. `0` Overview, `1` Rating, `2` Genres, `3` Quality, `4` Group, `5` Size, `6` Links, `7` Release, `8` Poster, `9` Fanart."),
            f("importFields")
                .check(Check::OneOfInt(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]))
                .doc("Import fields. `0` Overview, `1` Rating, `2` Genres, `3` Quality, `4` Codecs, `5` Group, `6` Size, `7` Languages, `8` Subtitles, `9` Links, `10` Release, `11` Poster."),
        ],
    ),
    variant(
        "email",
        "Email",
        "Email",
        "EmailSettings",
        &[
            f("server").required().doc("Server."),
            PORT,
            f("requireEncryption").doc("Require encryption flag."),
            USERNAME,
            PASSWORD,
            FROM,
            f("to").required().doc("To."),
            f("cc").doc("Cc."),
            f("bcc").doc("Bcc."),
        ],
    ),
    variant(
        "emby",
        "Emby",
        "MediaBrowser",
        "MediaBrowserSettings",
        &[HOST, PORT, USE_SSL, API_KEY, NOTIFY, UPDATE_LIBRARY],
    ),
    variant(
        "gotify",
        "Gotify",
        "Gotify",
        "GotifySettings",
        &[
            f("server").required().check(Check::HttpUrl).doc("Server."),
            f("appToken").required().doc("App token."),
            f("priority")
                .check(Check::OneOfInt(&[0, 2, 5, 8]))
                .doc("Priority. `0` Min, `2` Low, `5` Normal, `8` High."),
        ],
    ),
    variant(
        "join",
        "Join",
        "Join",
        "JoinSettings",
        &[
            API_KEY,
            f("deviceNames").doc("Device names, comma separated."),
            f("priority")
                .check(Check::OneOfInt(&[-2, -1, 0, 1, 2]))
                .doc("Priority. `-2` Silent, `-1` Quiet, `0` Normal, `1` High, `2` Emergency."),
        ],
    ),
    variant(
        "kodi",
        "Kodi",
        "Xbmc",
        "XbmcSettings",
        &[
            HOST,
            PORT,
            USE_SSL,
            USERNAME,
            PASSWORD,
            f("displayTime").doc("Display time."),
            NOTIFY,
            UPDATE_LIBRARY,
            f("cleanLibrary").doc("Clean library flag."),
            f("alwaysUpdate").doc("Always update flag."),
        ],
    ),
    variant(
        "mailgun",
        "Mailgun",
        "Mailgun",
        "MailgunSettings",
        &[
            API_KEY,
            f("useEuEndpoint").doc("Use EU endpoint flag."),
            FROM,
            f("senderDomain").required().doc("Sender domain."),
            RECIPIENTS,
        ],
    ),
    variant(
        "ntfy",
        "Ntfy",
        "Ntfy",
        "NtfySettings",
        &[
            f("serverUrl").check(Check::HttpUrl).doc("Server URL."),
            USERNAME,
            PASSWORD,
            f("topics").required().doc("Topics."),
            f("priority")
                .check(Check::OneOfInt(&[1, 2, 3, 4, 5]))
                .doc("Priority. `1` Min, `2` Low, `3` Default, `4` High, `5` Max."),
            f("fieldTags").doc("Tags."),
        ],
    ),
    variant(
        "plex",
        "Plex",
        "PlexServer",
        "PlexServerSettings",
        &[
            HOST,
            PORT,
            USE_SSL,
            f("authToken").required().doc("Auth token."),
            UPDATE_LIBRARY,
        ],
    ),
    variant(
        "prowl",
        "Prowl",
        "Prowl",
        "ProwlSettings",
        &[
            API_KEY,
            f("priority")
                .check(Check::OneOfInt(&[-2, -1, 0, 1, 2]))
                .doc("Priority. `-2` VeryLow, `-1` Low, `0` Normal, `1` High, `2` Emergency."),
        ],
    ),
    variant(
        "pushbullet",
        "Pushbullet",
        "Pushbullet",
        "PushbulletSettings",
        &[
            API_KEY,
            f("channelTags").doc("Channel tags."),
            f("deviceIds").doc("Device IDs."),
            f("senderId").doc("Sender ID."),
        ],
    ),
    variant(
        "pushover",
        "Pushover",
        "Pushover",
        "PushoverSettings",
        &[
            API_KEY,
            f("userKey").required().doc("User key."),
            f("devices").doc("Devices."),
            f("priority")
                .check(Check::OneOfInt(&[-1, 0, 1, 2]))
                .doc("Priority. `-1` Low, `0` Normal, `1` High, `2` Emergency."),
            f("retry").doc("Retry."),
            f("expire").doc("Expire."),
            f("sound").doc("Sound."),
        ],
    ),
    variant(
        "sendgrid",
        "Sendgrid",
        "SendGrid",
        "SendGridSettings",
        &[API_KEY, FROM, RECIPIENTS],
    ),
    variant(
        "signal",
        "Signal",
        "Signal",
        "SignalSettings",
        &[
            f("host").required().doc("Host."),
            PORT,
            USE_SSL,
            f("senderNumber").required().doc("Sender number."),
            f("receiverId").required().doc("Receiver ID."),
            f("authUsername").doc("Username."),
            f("authPassword").doc("Password."),
        ],
    ),
    variant(
        "slack",
        "Slack",
        "Slack",
        "SlackSettings",
        &[
            WEBHOOK_URL,
            USERNAME,
            f("icon").doc("Icon."),
            f("channel").doc("Channel."),
        ],
    ),
    variant(
        "synology_indexer",
        "Synology Indexer",
        "SynologyIndexer",
        "SynologyIndexerSettings",
        &[UPDATE_LIBRARY],
    ),
    variant(
        "telegram",
        "Telegram",
        "Telegram",
        "TelegramSettings",
        &[
            f("botToken").required().doc("Bot token."),
            f("chatId").required().doc("Chat ID."),
            f("sendSilently").doc("Send silently flag."),
        ],
    ),
    variant("trakt", "Trakt", "Trakt", "TraktSettings", &TRAKT_AUTH),
    variant(
        "twitter",
        "Twitter",
        "Twitter",
        "TwitterSettings",
        &[
            f("accessToken").required().doc("Access token."),
            f("accessTokenSecret").required().doc("Access token secret."),
            f("consumerKey").required().doc("Consumer key."),
            f("consumerSecret").required().doc("Consumer secret."),
            f("mention").doc("Mention."),
            f("directMessage").doc("Direct message flag."),
        ],
    ),
    variant(
        "webhook",
        "Webhook",
        "Webhook",
        "WebhookSettings",
        &[
            f("url").required().check(Check::HttpUrl).doc("URL."),
            f("method")
                .check(Check::OneOfInt(&[1, 2]))
                .doc("Method. `1` POST, `2` PUT."),
            USERNAME,
            PASSWORD,
        ],
    ),
];
