//! Locale value and notification message catalog.
//!
//! The active locale is an explicit constructor argument -- the core never
//! inspects the environment. The catalog carries the localized title/body
//! pairs for every reminder kind; callers only consume resolved strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reminder::ReminderKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh-CN" | "zh-cn" | "zh" => Ok(Locale::ZhCn),
            "en" | "en-US" | "en-us" => Ok(Locale::En),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}

/// A resolved notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub title: &'static str,
    pub body: &'static str,
}

/// Resolve the localized title/body for a reminder kind.
///
/// The lunch reminder ships Chinese strings only; other locales receive the
/// Chinese text unchanged, matching the original catalog.
pub fn for_kind(kind: ReminderKind, locale: Locale) -> Message {
    match (kind, locale) {
        (ReminderKind::Water, Locale::ZhCn) => Message {
            title: "\u{1F4A7} 该喝水了！",
            body: "长时间工作容易导致脱水，记得要多喝水哦！",
        },
        (ReminderKind::Water, Locale::En) => Message {
            title: "\u{1F4A7} Time to Hydrate!",
            body: "Working for long periods can lead to dehydration. Remember to drink water!",
        },
        (ReminderKind::Standup, Locale::ZhCn) => Message {
            title: "\u{1F9D8} 该起来活动了！",
            body: "久坐对健康有害，起来走走，伸伸腰吧！",
        },
        (ReminderKind::Standup, Locale::En) => Message {
            title: "\u{1F9D8} Time to Stand Up!",
            body: "Sitting too long is harmful to your health. Get up and stretch!",
        },
        (ReminderKind::AfternoonTea, Locale::ZhCn) => Message {
            title: "\u{1F375} 下午茶时间到！",
            body: "三点几啦！饮茶先啦！",
        },
        (ReminderKind::AfternoonTea, Locale::En) => Message {
            title: "\u{2615} Coffee Break",
            body: "Coffee, tea, or meme?",
        },
        (ReminderKind::Lunch, _) => Message {
            title: "\u{1F35A} 开饭啦！",
            body: "事已至此，先吃饭吧",
        },
    }
}
