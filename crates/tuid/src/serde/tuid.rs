use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Tuid;

impl Serialize for Tuid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tuid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TuidVisitor;

        impl de::Visitor<'_> for TuidVisitor {
            type Value = Tuid;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a 28 character tuid string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Tuid::parse(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(TuidVisitor)
    }
}
