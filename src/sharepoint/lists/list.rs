//! The SharePoint list proxy.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::runtime::{
    ClientObject, ClientQuery, ClientResult, ClientValue, Entity, EntityCollection,
    IdentityResolver, PathParameter, Payload, PropertyState, ResourcePath, ReturnType,
    ServiceOperationQuery,
};
use crate::sharepoint::{
    CamlQuery, ChangeCollection, ChangeQuery, CheckedOutFileCollection, ContentTypeCollection,
    FieldCollection, Folder, FormCollection, ItemCreation, ListItem, ListItemCollection,
    ListItemCreationInformation, RelatedFieldCollection, View, ViewCollection, Web,
};

/// Binds an unbound list to `GetById(<id>)` or `GetByTitle('<title>')`
/// below its parent collection.
fn list_path(name: &str, value: &Value, collection_path: &ResourcePath) -> Option<ResourcePath> {
    let operation = match name {
        "Id" => "GetById",
        "Title" => "GetByTitle",
        _ => return None,
    };
    let param = PathParameter::from_json(value)?;
    Some(collection_path.service_operation(operation, Some(vec![param])))
}

pub(crate) const LIST_IDENTITY: IdentityResolver =
    IdentityResolver::new(&["Id", "Title"], list_path);

/// A SharePoint list.
///
/// Getters never touch the network. Navigation getters return the fetched
/// proxy when the list was loaded with that property selected (which
/// expands it), and otherwise a fresh proxy addressed below the list. Operations enqueue
/// queries on the list's [`ClientContext`](crate::ClientContext) and
/// return proxies or [`ClientResult`]s that are filled in by
/// [`execute_query`](crate::ClientContext::execute_query).
///
/// # Example
///
/// ```rust,ignore
/// let list = ctx.web().lists().get_by_title("Tasks");
///
/// let items = list.get_items(None);
/// let url = list.get_web_dav_url("/sites/dev/Lists/Tasks");
/// ctx.execute_query().await?;
///
/// println!("{} items, WebDAV at {:?}", items.len(), url.value());
/// ```
#[derive(Clone, Debug)]
pub struct List {
    object: ClientObject,
}

impl Entity for List {
    const NAME: &'static str = "SP.List";
    const NAVIGATION_PROPERTIES: &'static [&'static str] = &[
        "Items",
        "RootFolder",
        "Fields",
        "Views",
        "DefaultView",
        "ContentTypes",
        "Forms",
        "ParentWeb",
    ];

    fn from_object(object: ClientObject) -> Self {
        object.set_identity_resolver(LIST_IDENTITY);
        Self { object }
    }

    fn object(&self) -> &ClientObject {
        &self.object
    }
}

impl List {
    fn operation(&self, name: &str) -> ServiceOperationQuery {
        ServiceOperationQuery::new(&self.object, name)
    }

    fn enqueue(&self, query: ServiceOperationQuery) {
        self.object
            .context()
            .add_query(ClientQuery::ServiceOperation(query));
    }

    fn child_at_operation<E: Entity>(&self, name: &str, params: Vec<PathParameter>) -> E {
        E::new(
            self.object.context(),
            self.resource_path()
                .map(|path| path.service_operation(name, Some(params))),
        )
    }

    /// Saves the list as a template in the list template gallery.
    pub fn save_as_template(
        &self,
        file_name: &str,
        name: &str,
        description: &str,
        save_data: bool,
    ) -> &Self {
        let payload = json!({
            "strFileName": file_name,
            "strName": name,
            "strDescription": description,
            "bSaveData": save_data,
        });
        self.enqueue(self.operation("saveAsTemplate").payload(Payload::Json(payload)));
        self
    }

    /// Returns the item with the given unique id (a GUID). No query is enqueued.
    #[must_use]
    pub fn get_item_by_unique_id(&self, unique_id: &str) -> ListItem {
        self.child_at_operation("getItemByUniqueId", vec![unique_id.into()])
    }

    /// Returns the WebDAV URL of a file or folder in this list.
    #[must_use]
    pub fn get_web_dav_url(&self, source_url: &str) -> ClientResult<String> {
        let result = ClientResult::new();
        self.enqueue(
            self.operation("getWebDavUrl")
                .payload(Payload::Json(json!({ "sourceUrl": source_url })))
                .returns(ReturnType::Value(Arc::new(result.clone()))),
        );
        result
    }

    /// Returns the items matching a CAML query (all items when `None`).
    #[must_use]
    pub fn get_items(&self, caml_query: Option<CamlQuery>) -> ListItemCollection {
        let caml_query = caml_query.unwrap_or_else(CamlQuery::all_items);
        let items = ListItemCollection::new(self.object.context(), self.child_path("items"));
        self.enqueue(
            self.operation("GetItems")
                .payload(Payload::Json(caml_query.to_json()))
                .payload_key("query")
                .returns(ReturnType::Object(items.object().clone())),
        );
        items
    }

    /// Creates an item.
    ///
    /// A property map is POSTed to the list's `items` collection right
    /// away. Creation information is sent to `addItem` once the root
    /// folder's server-relative URL is known, with `FolderUrl` set to the
    /// absolute root folder URL; if that URL is not loaded yet a read of
    /// the root folder is enqueued first.
    ///
    /// The returned item is registered as a member of [`List::items`] and
    /// binds its own path once the response supplies its `Id`.
    pub fn add_item(&self, creation: impl Into<ItemCreation>) -> ListItem {
        let context = self.object.context();
        let item = ListItem::new(context, None);
        let items = self.items();
        if items.resource_path().is_none() {
            tracing::debug!("Adding item to an unbound list; the item cannot bind a path");
        }
        items.add_child(&item);

        match creation.into() {
            ItemCreation::Properties(properties) => {
                for (name, value) in properties {
                    item.object().set_property(&name, value, true);
                }
                item.ensure_type_name(self);
                self.enqueue(
                    self.operation("items")
                        .payload(Payload::Entity(item.object().clone()))
                        .returns(ReturnType::Object(item.object().clone())),
                );
            }
            ItemCreation::CreationInfo(info) => {
                self.add_item_in_folder(info, &item);
            }
        }
        item
    }

    fn add_item_in_folder(&self, mut info: ListItemCreationInformation, item: &ListItem) {
        let root_folder = self.root_folder();
        let folder = root_folder.object().clone();
        let list = self.object.clone();
        let sink = item.object().clone();

        root_folder
            .object()
            .ensure_property("ServerRelativeUrl", move || {
                let Some(relative_url) = folder
                    .get_property::<String>("ServerRelativeUrl")
                    .fetched()
                else {
                    tracing::warn!("Root folder has no ServerRelativeUrl; addItem not enqueued");
                    return;
                };
                info.folder_url = Some(format!("{}{}", list.context().base_url(), relative_url));

                let query = ServiceOperationQuery::new(&list, "addItem")
                    .payload(Payload::Json(info.to_json()))
                    .payload_key("parameters")
                    .returns(ReturnType::Object(sink));
                list.context().add_query(ClientQuery::ServiceOperation(query));
            });
    }

    /// Returns the item with the given id. No query is enqueued.
    #[must_use]
    pub fn get_item_by_id(&self, item_id: i64) -> ListItem {
        self.child_at_operation("getItemById", vec![item_id.into()])
    }

    /// Returns the view with the given id. No query is enqueued.
    #[must_use]
    pub fn get_view(&self, view_id: &str) -> View {
        self.child_at_operation("getView", vec![view_id.into()])
    }

    /// Returns changes to the list (list-level additions, updates and
    /// deletions when `query` is `None`).
    #[must_use]
    pub fn get_changes(&self, query: Option<ChangeQuery>) -> ChangeCollection {
        let query = query.unwrap_or_else(ChangeQuery::list_scope);
        let changes = ChangeCollection::new(self.object.context(), None);
        self.enqueue(
            self.operation("getChanges")
                .payload(Payload::Json(query.to_json()))
                .payload_key("query")
                .returns(ReturnType::Object(changes.object().clone())),
        );
        changes
    }

    /// Returns the files checked out in this list.
    #[must_use]
    pub fn get_checked_out_files(&self) -> CheckedOutFileCollection {
        let files = CheckedOutFileCollection::new(self.object.context(), None);
        self.enqueue(
            self.operation("GetCheckedOutFiles")
                .returns(ReturnType::Object(files.object().clone())),
        );
        files
    }

    /// Returns the lookup fields that use this list as their source. No
    /// query is enqueued.
    #[must_use]
    pub fn get_related_fields(&self) -> RelatedFieldCollection {
        self.child_at_operation("getRelatedFields", Vec::new())
    }

    /// Deletes the list.
    ///
    /// The list is detached from its parent collection immediately; the
    /// server-side delete happens on the next execution.
    pub fn delete_object(&self) -> &Self {
        self.object.context().add_query(ClientQuery::DeleteEntity {
            target: self.object.clone(),
        });
        self.object.remove_from_parent_collection();
        self
    }

    /// Enqueues an update sending the changed properties.
    pub fn update(&self) -> &Self {
        self.object.context().add_query(ClientQuery::UpdateEntity {
            target: self.object.clone(),
        });
        self
    }

    /// Whether new folders can be created in the list.
    #[must_use]
    pub fn enable_folder_creation(&self) -> PropertyState<bool> {
        self.object.get_property("EnableFolderCreation")
    }

    /// Sets `EnableFolderCreation` for the next update.
    pub fn set_enable_folder_creation(&self, value: bool) -> &Self {
        self.object
            .set_property("EnableFolderCreation", Value::Bool(value), true);
        self
    }

    /// The list items.
    #[must_use]
    pub fn items(&self) -> ListItemCollection {
        self.navigation_property("Items", "items")
    }

    /// The root folder of the list.
    #[must_use]
    pub fn root_folder(&self) -> Folder {
        self.navigation_property("RootFolder", "RootFolder")
    }

    /// The fields of the list.
    #[must_use]
    pub fn fields(&self) -> FieldCollection {
        self.navigation_property("Fields", "Fields")
    }

    /// The views of the list.
    #[must_use]
    pub fn views(&self) -> ViewCollection {
        self.navigation_property("Views", "views")
    }

    /// The default view of the list.
    #[must_use]
    pub fn default_view(&self) -> View {
        self.navigation_property("DefaultView", "DefaultView")
    }

    /// The content types associated with the list.
    #[must_use]
    pub fn content_types(&self) -> ContentTypeCollection {
        self.navigation_property("ContentTypes", "contenttypes")
    }

    /// The list forms.
    #[must_use]
    pub fn forms(&self) -> FormCollection {
        self.navigation_property("Forms", "forms")
    }

    /// The site containing the list.
    #[must_use]
    pub fn parent_web(&self) -> Web {
        self.navigation_property("ParentWeb", "parentWeb")
    }

    /// The number of items in the list.
    #[must_use]
    pub fn item_count(&self) -> PropertyState<i64> {
        self.object.get_property("ItemCount")
    }

    /// The list title.
    #[must_use]
    pub fn title(&self) -> PropertyState<String> {
        self.object.get_property("Title")
    }

    /// Sets the title for the next update.
    ///
    /// On an unbound list this also binds `GetByTitle('<title>')` below
    /// the parent collection.
    pub fn set_title(&self, title: &str) -> &Self {
        self.object.set_property("Title", Value::from(title), true);
        self
    }

    /// The list description.
    #[must_use]
    pub fn description(&self) -> PropertyState<String> {
        self.object.get_property("Description")
    }

    /// Sets the description for the next update.
    pub fn set_description(&self, description: &str) -> &Self {
        self.object
            .set_property("Description", Value::from(description), true);
        self
    }

    /// The list id (a GUID).
    #[must_use]
    pub fn id(&self) -> PropertyState<String> {
        self.object.get_property("Id")
    }

    /// The entity type of the list's items (e.g., `SP.Data.TasksListItem`).
    #[must_use]
    pub fn list_item_entity_type_full_name(&self) -> PropertyState<String> {
        self.object.get_property("ListItemEntityTypeFullName")
    }
}
