//! Microsoft Graph client for OneNote notebooks, sections and pages.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared_types::{first_id_by_name, GraphList, NotebookRef, PageCreationResult, SectionRef};
use tracing::debug;

use crate::auth::TokenSource;
use crate::config::GraphSettings;
use crate::error::{PageError, PageResult};
use crate::page::{blank_page, PAGE_CONTENT_TYPE};

const SELECT_ID_AND_NAME: &str = "$select=id,displayName";

/// Client for interacting with OneNote through Microsoft Graph.
///
/// A value only exists once a bearer token has been obtained, so every
/// method can assume it is authenticated.
pub struct OneNoteClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl OneNoteClient {
    /// Acquire a token from `source` and build the client around it.
    pub async fn authenticate(
        settings: &GraphSettings,
        source: &dyn TokenSource,
    ) -> PageResult<Self> {
        let token = source
            .access_token(&settings.scopes)
            .await
            .map_err(|e| match e {
                e @ PageError::AuthenticationFailed(_) => e,
                other => PageError::AuthenticationFailed(other.to_string()),
            })?;

        if token.trim().is_empty() {
            return Err(PageError::AuthenticationFailed(
                "Failed to obtain access token".to_string(),
            ));
        }

        tracing::info!("Obtained access token for {}", settings.base_url);

        Ok(Self {
            http: Client::new(),
            base_url: settings.base_url.clone(),
            access_token: token,
        })
    }

    pub async fn list_notebooks(&self) -> PageResult<Vec<NotebookRef>> {
        let url = format!(
            "{}/me/onenote/notebooks?{}",
            self.base_url, SELECT_ID_AND_NAME
        );
        self.get_all(url).await
    }

    /// Id of the first notebook named exactly `name`.
    pub async fn find_notebook_id(&self, name: &str) -> PageResult<String> {
        let notebooks = self.list_notebooks().await?;

        match first_id_by_name(&notebooks, name) {
            Some(id) => {
                tracing::info!("Found notebook '{}' with ID: {}", name, id);
                Ok(id.to_string())
            }
            None => {
                tracing::warn!("Could not find notebook {}", name);
                Err(PageError::notebook_not_found(name))
            }
        }
    }

    pub async fn list_sections(&self, notebook_id: &str) -> PageResult<Vec<SectionRef>> {
        let url = format!(
            "{}/me/onenote/notebooks/{}/sections?{}",
            self.base_url,
            urlencoding::encode(notebook_id),
            SELECT_ID_AND_NAME
        );
        self.get_all(url).await
    }

    /// Every section in the account, regardless of notebook.
    pub async fn list_all_sections(&self) -> PageResult<Vec<SectionRef>> {
        let url = format!(
            "{}/me/onenote/sections?{}",
            self.base_url, SELECT_ID_AND_NAME
        );
        self.get_all(url).await
    }

    pub async fn find_section_id(
        &self,
        notebook_name: &str,
        section_name: &str,
    ) -> PageResult<String> {
        let notebook_id = self.find_notebook_id(notebook_name).await?;
        let sections = self.list_sections(&notebook_id).await?;

        match first_id_by_name(&sections, section_name) {
            Some(id) => {
                tracing::info!(
                    "Found section '{}' in '{}' with ID: {}",
                    section_name,
                    notebook_name,
                    id
                );
                Ok(id.to_string())
            }
            None => {
                tracing::warn!(
                    "Could not find section {} in notebook {}",
                    section_name,
                    notebook_name
                );
                Err(PageError::section_not_found(section_name))
            }
        }
    }

    /// Create one blank page titled `title`. Only `201 Created` counts.
    pub async fn create_page(&self, section_id: &str, title: &str) -> PageResult<()> {
        let url = format!(
            "{}/me/onenote/sections/{}/pages",
            self.base_url,
            urlencoding::encode(section_id)
        );
        debug!(url = %url, title = %title, "Creating OneNote page");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, PAGE_CONTENT_TYPE)
            .body(blank_page(title).into_bytes())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(PageError::RemoteRequestFailed {
            status: status.as_u16(),
            body,
        })
    }

    /// Create pages in order, stopping at the first one that fails.
    ///
    /// Titles after the failing one are never attempted and have no entry
    /// in the returned list.
    pub async fn create_pages<S: AsRef<str>>(
        &self,
        section_id: &str,
        titles: &[S],
    ) -> Vec<PageCreationResult> {
        let mut results = Vec::with_capacity(titles.len());

        for title in titles {
            let title = title.as_ref();
            match self.create_page(section_id, title).await {
                Ok(()) => {
                    tracing::info!("Created page: {}", title);
                    results.push(PageCreationResult::created(title));
                }
                Err(e) => {
                    let (status, body) = match e {
                        PageError::RemoteRequestFailed { status, body } => (Some(status), body),
                        other => (None, other.to_string()),
                    };
                    tracing::error!(
                        "Could not create page with title \"{}\": {:?} {}",
                        title,
                        status,
                        body
                    );
                    results.push(PageCreationResult::failed(title, status, body));
                    break;
                }
            }
        }

        results
    }

    /// GET a list endpoint and follow `@odata.nextLink` until exhausted.
    async fn get_all<T: DeserializeOwned>(&self, first_url: String) -> PageResult<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next {
            let page: GraphList<T> = self.get_json(&url).await?;
            items.extend(page.value);
            next = page.next_link;
        }

        Ok(items)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> PageResult<T> {
        debug!(url = %url, "Making Microsoft Graph request");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("Graph request failed: {} - {}", status, body);
            return Err(PageError::RemoteRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
