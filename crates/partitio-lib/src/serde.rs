use std::num::NonZeroU64;

impl<T> serde::Serialize for crate::Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.raw().get().serialize(serializer)
    }
}

impl<'de, T> serde::Deserialize<'de> for crate::Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        let raw = NonZeroU64::new(raw)
            .ok_or_else(|| serde::de::Error::custom("0 isn't a valid id"))?;
        Ok(Self::from_raw(raw))
    }
}
