//! String schemas: length, pattern and format constraints.

use conform_core::Pattern;

use super::{typed, LengthConstraints};
use crate::descriptor::{impl_descriptor, Descriptor, Schema};
use crate::node::{EmailOptions, Rule, UrlOptions, UuidOptions, UuidVersion};

/// `{ $isType: "String" }` plus string rules.
#[derive(Debug, Clone, PartialEq)]
pub struct StringSchema {
    schema: Schema,
}

impl_descriptor!(StringSchema => String);

impl LengthConstraints for StringSchema {}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            schema: typed("String"),
        }
    }

    /// Require `pattern` to match somewhere in the string.
    pub fn matches(self, pattern: Pattern) -> Self {
        self.update(Rule::Match(pattern))
    }

    pub fn email(self) -> Self {
        self.email_with(EmailOptions::default())
    }

    /// An email address, optionally restricted to a domain.
    pub fn email_with(self, options: EmailOptions) -> Self {
        self.update(Rule::Email(options))
    }

    /// A parseable absolute URL.
    pub fn url(self) -> Self {
        self.url_with(UrlOptions::default())
    }

    pub fn url_with(self, options: UrlOptions) -> Self {
        self.update(Rule::Url(options))
    }

    /// A UUID of any version.
    pub fn uuid(self) -> Self {
        self.update(Rule::Uuid(UuidOptions::default()))
    }

    pub fn uuid_version(self, version: UuidVersion) -> Self {
        self.update(Rule::Uuid(UuidOptions {
            version: Some(version),
        }))
    }

    /// Contains at least one pictographic character.
    pub fn emoji(self) -> Self {
        self.update(Rule::Emoji)
    }

    pub fn base64(self) -> Self {
        self.update(Rule::Base64)
    }

    pub fn base64url(self) -> Self {
        self.update(Rule::Base64Url)
    }

    pub fn nanoid(self) -> Self {
        self.update(Rule::Nanoid)
    }

    pub fn cuid(self) -> Self {
        self.update(Rule::Cuid)
    }

    pub fn cuid2(self) -> Self {
        self.update(Rule::Cuid2)
    }

    pub fn ulid(self) -> Self {
        self.update(Rule::Ulid)
    }

    pub fn ipv4(self) -> Self {
        self.update(Rule::Ipv4)
    }

    pub fn ipv6(self) -> Self {
        self.update(Rule::Ipv6)
    }

    pub fn cidrv4(self) -> Self {
        self.update(Rule::Cidrv4)
    }

    pub fn cidrv6(self) -> Self {
        self.update(Rule::Cidrv6)
    }

    /// `YYYY-MM-DD`, a real calendar date.
    pub fn iso_date(self) -> Self {
        self.update(Rule::IsoDate)
    }

    pub fn iso_time(self) -> Self {
        self.update(Rule::IsoTime)
    }

    pub fn iso_datetime(self) -> Self {
        self.update(Rule::IsoDateTime)
    }

    pub fn iso_duration(self) -> Self {
        self.update(Rule::IsoDuration)
    }

    /// No leading or trailing whitespace. A check, not a transform.
    pub fn trim(self) -> Self {
        self.update(Rule::Trim)
    }

    /// Already lowercase. A check, not a transform.
    pub fn to_lower_case(self) -> Self {
        self.update(Rule::ToLowerCase)
    }

    /// Already uppercase. A check, not a transform.
    pub fn to_upper_case(self) -> Self {
        self.update(Rule::ToUpperCase)
    }
}
