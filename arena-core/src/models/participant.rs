use serde::{Deserialize, Serialize};

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Accepts any non-empty string; `None` and `""` are treated as missing
            #[must_use]
            pub fn parse(value: Option<&str>) -> Option<Self> {
                value.filter(|v| !v.is_empty()).map(|v| Self(v.to_string()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

name_type!(
    /// Opaque participant identity chosen by the client
    Identity
);

name_type!(
    /// Room name as known to the media service
    RoomName
);

/// Publish/subscribe rights requested for a join token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_publish: bool,
    pub can_subscribe: bool,
}

impl Default for Capabilities {
    /// Viewers: subscribe only
    fn default() -> Self {
        Self {
            can_publish: false,
            can_subscribe: true,
        }
    }
}

impl Capabilities {
    /// Fill in the defaults for whichever flags the caller omitted
    #[must_use]
    pub fn from_flags(can_publish: Option<bool>, can_subscribe: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            can_publish: can_publish.unwrap_or(defaults.can_publish),
            can_subscribe: can_subscribe.unwrap_or(defaults.can_subscribe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_missing() {
        assert!(Identity::parse(None).is_none());
        assert!(Identity::parse(Some("")).is_none());
        assert_eq!(Identity::parse(Some("user-1")).unwrap().as_str(), "user-1");
        // whitespace is kept verbatim; identities are opaque
        assert_eq!(RoomName::parse(Some(" ")).unwrap().as_str(), " ");
    }

    #[test]
    fn test_capability_defaults() {
        assert_eq!(
            Capabilities::from_flags(None, None),
            Capabilities {
                can_publish: false,
                can_subscribe: true
            }
        );
        assert_eq!(
            Capabilities::from_flags(Some(true), Some(false)),
            Capabilities {
                can_publish: true,
                can_subscribe: false
            }
        );
    }
}
