use jenkins_sync_core::document::{parse_folder, Folder, FolderSecurity};

const FOLDER_XML: &str = r#"<?xml version='1.1' encoding='UTF-8'?>
<com.cloudbees.hudson.plugins.folder.Folder plugin="cloudbees-folder@6.15">
  <actions/>
  <description>Example Description</description>
  <displayName>Example Display Name</displayName>
  <properties>
    <com.cloudbees.hudson.plugins.folder.properties.AuthorizationMatrixProperty>
      <inheritanceStrategy class="org.jenkinsci.plugins.matrixauth.inheritance.InheritParentStrategy"/>
      <permission>com.cloudbees.plugins.credentials.CredentialsProvider.Create:anonymous</permission>
      <permission>hudson.model.Item.Cancel:authenticated</permission>
    </com.cloudbees.hudson.plugins.folder.properties.AuthorizationMatrixProperty>
    <org.jenkinsci.plugins.workflow.libs.FolderLibraries plugin="workflow-cps-global-lib@2.17">
      <libraries>
        <org.jenkinsci.plugins.workflow.libs.LibraryConfiguration>
          <name>Example Library Configuration</name>
          <implicit>false</implicit>
        </org.jenkinsci.plugins.workflow.libs.LibraryConfiguration>
      </libraries>
    </org.jenkinsci.plugins.workflow.libs.FolderLibraries>
  </properties>
  <folderViews class="com.cloudbees.hudson.plugins.folder.views.DefaultFolderViewHolder">
    <views/>
  </folderViews>
  <healthMetrics/>
</com.cloudbees.hudson.plugins.folder.Folder>"#;

#[test]
fn test_parse_folder_known_fields() {
    let folder = parse_folder(FOLDER_XML).expect("document should parse");

    assert_eq!(folder.description, "Example Description");
    assert_eq!(folder.display_name, "Example Display Name");

    let security = folder
        .properties
        .security
        .as_ref()
        .expect("security matrix should be recognized");
    assert_eq!(
        security.inheritance_strategy,
        "org.jenkinsci.plugins.matrixauth.inheritance.InheritParentStrategy"
    );
    assert_eq!(
        security.permissions,
        [
            "com.cloudbees.plugins.credentials.CredentialsProvider.Create:anonymous",
            "hudson.model.Item.Cancel:authenticated",
        ]
    );
}

#[test]
fn test_parse_folder_captures_unknown_properties() {
    let folder = parse_folder(FOLDER_XML).expect("document should parse");

    assert_eq!(
        folder.properties.other.len(),
        1,
        "the plugin-contributed property should land in the opaque list"
    );
    let library = &folder.properties.other[0];
    assert_eq!(library.name, "org.jenkinsci.plugins.workflow.libs.FolderLibraries");
    assert_eq!(
        library.attributes,
        [("plugin".to_owned(), "workflow-cps-global-lib@2.17".to_owned())]
    );
    assert!(
        library.raw.contains("<name>Example Library Configuration</name>"),
        "inner content should be captured verbatim, got: {}",
        library.raw
    );

    assert_eq!(
        folder.folder_views.attributes,
        [(
            "class".to_owned(),
            "com.cloudbees.hudson.plugins.folder.views.DefaultFolderViewHolder".to_owned()
        )]
    );
    assert!(folder.health_metrics.raw.is_empty());
}

#[test]
fn test_render_round_trips_unknown_properties() {
    let folder = parse_folder(FOLDER_XML).expect("document should parse");
    let rendered = folder.render().expect("document should render");

    let library = &folder.properties.other[0];
    assert!(
        rendered.contains(&format!(
            "<org.jenkinsci.plugins.workflow.libs.FolderLibraries plugin=\"workflow-cps-global-lib@2.17\">{}</org.jenkinsci.plugins.workflow.libs.FolderLibraries>",
            library.raw
        )),
        "the opaque property's tag, attribute and inner content should be reproduced byte-for-byte, got: {rendered}"
    );

    let reparsed = parse_folder(&rendered).expect("rendered document should parse again");
    assert_eq!(
        reparsed, folder,
        "parse -> render -> parse should be lossless"
    );
}

#[test]
fn test_render_orders_known_fields() {
    let rendered = parse_folder(FOLDER_XML)
        .expect("document should parse")
        .render()
        .expect("document should render");

    let description = rendered.find("<description>").expect("description present");
    let display_name = rendered.find("<displayName>").expect("displayName present");
    let properties = rendered.find("<properties>").expect("properties present");
    let folder_views = rendered.find("<folderViews").expect("folderViews present");
    let health_metrics = rendered.find("<healthMetrics").expect("healthMetrics present");
    assert!(
        description < display_name
            && display_name < properties
            && properties < folder_views
            && folder_views < health_metrics,
        "known fields should render in a fixed order, got: {rendered}"
    );
}

#[test]
fn test_render_default_folder() {
    let folder = Folder {
        description: "Managed externally".to_owned(),
        ..Folder::default()
    };
    let rendered = folder.render().expect("document should render");

    assert!(rendered.starts_with("<com.cloudbees.hudson.plugins.folder.Folder>"));
    assert!(rendered.contains("<description>Managed externally</description>"));
    assert!(
        !rendered.contains("<displayName>"),
        "an empty display name should be omitted"
    );
    assert!(rendered.contains("<folderViews/>"));
    assert!(rendered.contains("<healthMetrics/>"));
}

#[test]
fn test_render_escapes_text_fields() {
    let folder = Folder {
        description: "a < b & 'c'".to_owned(),
        ..Folder::default()
    };
    let rendered = folder.render().expect("document should render");
    assert!(
        rendered.contains("a &lt; b &amp;"),
        "text content should be escaped on render, got: {rendered}"
    );
}

#[test]
fn test_security_survives_round_trip() {
    let folder = Folder {
        properties: jenkins_sync_core::document::FolderProperties {
            security: Some(FolderSecurity {
                inheritance_strategy:
                    "org.jenkinsci.plugins.matrixauth.inheritance.NonInheritingStrategy".to_owned(),
                permissions: vec!["hudson.model.Item.Discover:anonymous".to_owned()],
            }),
            other: Vec::new(),
        },
        ..Folder::default()
    };

    let rendered = folder.render().expect("document should render");
    let reparsed = parse_folder(&rendered).expect("rendered document should parse");
    assert_eq!(reparsed.properties.security, folder.properties.security);
}

#[test]
fn test_malformed_xml_is_an_error() {
    assert!(
        parse_folder("this is not a configuration document").is_err(),
        "content without a document root must not parse"
    );
    assert!(
        parse_folder("<a><b></a>").is_err(),
        "mismatched tags must not parse"
    );
}
