//! Dispatch of UI messages against a store, canvas and preferences store.

use super::{CollectionSummary, CoreMessage, Notification, Reply, UiMessage};
use crate::config::{LayoutConfig, PreferencesStore};
use crate::error::{ErrorContext, OptionContext, Result};
use crate::grouping::group_summaries;
use crate::host::Canvas;
use crate::pipeline::{create_table, CreateTableRequest};
use crate::store::VariableStore;

/// Every collection in `store` with its modes and variable count.
pub fn collection_summaries<S: VariableStore + ?Sized>(store: &S) -> Result<Vec<CollectionSummary>> {
    store
        .list_collections()
        .context("listing collections")?
        .into_iter()
        .map(|collection| -> Result<CollectionSummary> {
            let variable_count = store
                .list_variables(Some(&collection.id))
                .with_context(|| format!("listing variables of {}", collection.name))?
                .len();
            Ok(CollectionSummary {
                id: collection.id.clone(),
                name: collection.name.clone(),
                modes: collection.modes.clone(),
                variable_count,
            })
        })
        .collect()
}

/// Plugin-side message handler.
///
/// One controller serves one plugin run. Every handled message yields a
/// [`Reply`]; failures are turned into an error reply and never escape.
pub struct Controller<S, C, P> {
    store: S,
    canvas: C,
    preferences: P,
    layout: LayoutConfig,
}

impl<S, C, P> Controller<S, C, P>
where
    S: VariableStore,
    C: Canvas,
    P: PreferencesStore,
{
    pub fn new(store: S, canvas: C, preferences: P) -> Self {
        Self {
            store,
            canvas,
            preferences,
            layout: LayoutConfig::default(),
        }
    }

    /// Use `layout` for placement and font overrides of created tables.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Messages sent when the panel opens.
    pub fn start(&self) -> Reply {
        Reply::message(CoreMessage::SettingsLoaded {
            settings: self.preferences.load(),
        })
    }

    pub fn handle(&mut self, message: UiMessage) -> Reply {
        tracing::debug!(?message, "handling UI message");
        match self.dispatch(message) {
            Ok(reply) => reply,
            Err(err) => {
                if err.is_user_error() {
                    tracing::info!(error = %err, "request rejected");
                } else {
                    tracing::warn!(error = %err, "request failed");
                }
                Reply::error(err.to_string())
            }
        }
    }

    fn dispatch(&mut self, message: UiMessage) -> Result<Reply> {
        match message {
            UiMessage::LoadCollections => self.load_collections(),
            UiMessage::LoadGroups { collection_id } => self.load_groups(&collection_id),
            UiMessage::CreateTable(request) => self.create(&request),
            UiMessage::SaveSettings { settings } => {
                self.preferences.save(&settings)?;
                Ok(Reply::message(CoreMessage::SettingsLoaded { settings }))
            }
            UiMessage::Cancel => Ok(Reply::close()),
        }
    }

    fn load_collections(&self) -> Result<Reply> {
        let collections = collection_summaries(&self.store)?;
        Ok(Reply::message(CoreMessage::CollectionsLoaded { collections }))
    }

    fn load_groups(&self, collection_id: &str) -> Result<Reply> {
        self.store
            .collection_by_id(collection_id)
            .with_context(|| format!("looking up collection {collection_id}"))?
            .or_not_found("collection", collection_id)?;
        let variables = self
            .store
            .list_variables(Some(collection_id))
            .context("listing variables")?;
        Ok(Reply::message(CoreMessage::GroupsLoaded {
            groups: group_summaries(&variables),
            total_variables: variables.len(),
        }))
    }

    fn create(&mut self, request: &CreateTableRequest) -> Result<Reply> {
        let options = self
            .preferences
            .load()
            .with_overrides(
                request.table_theme,
                request.show_dev_token,
                request.show_swatches,
            )
            .table_options();
        let mut session = self.layout.session();
        let outcome = create_table(
            &self.store,
            request,
            options,
            &mut self.canvas,
            &mut session,
        )?;

        let rows = outcome.layout.row_count();
        let message = match outcome.layout.skipped_rows {
            0 => format!("Created table with {rows} variables"),
            skipped => format!("Created table with {rows} variables ({skipped} skipped)"),
        };
        Ok(Reply {
            messages: Vec::new(),
            notification: Some(Notification::success(message)),
            close: true,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }
}
