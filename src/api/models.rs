use crate::api::{ModelInfo, TagsResponse};
use crate::core::backend::BackendError;
use crate::utils::url::construct_api_url;

pub async fn fetch_models(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<TagsResponse, BackendError> {
    let tags_url = construct_api_url(base_url, "api/tags");
    let response = client
        .get(tags_url)
        .send()
        .await
        .map_err(|err| BackendError::from_transport(err, base_url))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::from_status(status, &body));
    }

    let body = response
        .text()
        .await
        .map_err(|err| BackendError::from_transport(err, base_url))?;
    let tags = serde_json::from_str::<TagsResponse>(&body)?;
    Ok(tags)
}

pub fn sort_models(models: &mut [ModelInfo]) {
    // Most recently pulled first, then by name for a stable listing
    models.sort_by(|a, b| match (&a.modified_at, &b.modified_at) {
        (Some(a_modified), Some(b_modified)) => b_modified
            .cmp(a_modified)
            .then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, modified_at: Option<&str>) -> ModelInfo {
        ModelInfo {
            name: name.to_string(),
            size: None,
            modified_at: modified_at.map(str::to_string),
        }
    }

    #[test]
    fn sorts_newest_first_then_by_name() {
        let mut models = vec![
            model("b-undated", None),
            model("old", Some("2024-01-01T00:00:00Z")),
            model("a-undated", None),
            model("new", Some("2024-06-01T00:00:00Z")),
        ];
        sort_models(&mut models);
        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old", "a-undated", "b-undated"]);
    }
}
