//! 部分更新中可置空的字段
//!
//! 字段缺省为 `None`（保持不变），显式 `null` 为 `Some(None)`（清空），
//! 有值为 `Some(Some(v))`。配合 `#[serde(default, deserialize_with = "nullable")]` 使用。

use serde::{Deserialize, Deserializer};

pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        chapter: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.chapter, None);

        let cleared: Patch = serde_json::from_str(r#"{"chapter": null}"#).unwrap();
        assert_eq!(cleared.chapter, Some(None));

        let set: Patch = serde_json::from_str(r#"{"chapter": "Fractions"}"#).unwrap();
        assert_eq!(set.chapter, Some(Some("Fractions".to_string())));
    }
}
