use std::collections::HashMap;

use jenkins_sync_core::contract::{JobRef, MockJenkinsClient, ViewRef};
use jenkins_sync_core::error::Error;
use jenkins_sync_core::resources::{folder, job, view};
use serial_test::serial;

const REMOTE_FOLDER_XML: &str = r#"<?xml version='1.1' encoding='UTF-8'?>
<com.cloudbees.hudson.plugins.folder.Folder plugin="cloudbees-folder@6.15">
  <description>Original description</description>
  <displayName>Original Name</displayName>
  <properties>
    <org.jenkinsci.plugins.workflow.libs.FolderLibraries plugin="workflow-cps-global-lib@2.17">
      <libraries>
        <org.jenkinsci.plugins.workflow.libs.LibraryConfiguration>
          <name>shared-lib</name>
        </org.jenkinsci.plugins.workflow.libs.LibraryConfiguration>
      </libraries>
    </org.jenkinsci.plugins.workflow.libs.FolderLibraries>
  </properties>
  <folderViews/>
  <healthMetrics/>
</com.cloudbees.hudson.plugins.folder.Folder>"#;

#[tokio::test]
#[serial]
async fn test_nested_folder_creation_yields_canonical_ids() {
    // Root-level folder first; the global namespace needs no existence check.
    let mut client = MockJenkinsClient::new();
    client
        .expect_create_job_in_folder()
        .withf(|xml: &str, name: &str, parents: &[String]| {
            xml.starts_with("<com.cloudbees.hudson.plugins.folder.Folder>")
                && name == "tf-acc-test-X"
                && parents.is_empty()
        })
        .return_once(|_, _, _| Ok(JobRef { base: "/job/tf-acc-test-X".to_owned() }));
    client
        .expect_get_job()
        .withf(|name: &str, parents: &[String]| name == "tf-acc-test-X" && parents.is_empty())
        .return_once(|_, _| Ok(JobRef { base: "/job/tf-acc-test-X".to_owned() }));
    client
        .expect_get_job_config()
        .return_once(|_| Ok(REMOTE_FOLDER_XML.to_owned()));

    let parent = folder::create(
        &client,
        &folder::FolderConfig {
            name: "tf-acc-test-X".to_owned(),
            description: "Acceptance testing sandbox".to_owned(),
            ..folder::FolderConfig::default()
        },
    )
    .await
    .expect("parent folder should be created");
    assert_eq!(parent.id, "/job/tf-acc-test-X");

    // Now a subfolder declared with the parent's materialized id.
    let mut client = MockJenkinsClient::new();
    client
        .expect_get_folder()
        .withf(|name: &str, parents: &[String]| name == "tf-acc-test-X" && parents.is_empty())
        .return_once(|_, _| Ok(JobRef { base: "/job/tf-acc-test-X".to_owned() }));
    client
        .expect_create_job_in_folder()
        .withf(|_, name: &str, parents: &[String]| {
            name == "subfolder" && parents == ["tf-acc-test-X"]
        })
        .return_once(|_, _, _| {
            Ok(JobRef { base: "/job/tf-acc-test-X/job/subfolder".to_owned() })
        });
    client
        .expect_get_job()
        .withf(|name: &str, parents: &[String]| name == "subfolder" && parents == ["tf-acc-test-X"])
        .return_once(|_, _| Ok(JobRef { base: "/job/tf-acc-test-X/job/subfolder".to_owned() }));
    client
        .expect_get_job_config()
        .return_once(|_| Ok(REMOTE_FOLDER_XML.to_owned()));

    let child = folder::create(
        &client,
        &folder::FolderConfig {
            name: "subfolder".to_owned(),
            folder: parent.id.clone(),
            ..folder::FolderConfig::default()
        },
    )
    .await
    .expect("nested folder should be created");
    assert_eq!(child.id, "/job/tf-acc-test-X/job/subfolder");
    assert_eq!(child.folder, "/job/tf-acc-test-X");
}

#[tokio::test]
#[serial]
async fn test_folder_read_reports_absence_on_prefix_not_found() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_get_job()
        .return_once(|_, _| Err("404 job not found".into()));

    let state = folder::read(&client, "gone")
        .await
        .expect("an absent folder is not an error");
    assert!(state.is_none());
}

#[tokio::test]
#[serial]
async fn test_folder_update_preserves_opaque_plugin_configuration() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_get_job()
        .returning(|_, _| Ok(JobRef { base: "/job/infra".to_owned() }));
    client
        .expect_get_job_config()
        .returning(|_| Ok(REMOTE_FOLDER_XML.to_owned()));
    client
        .expect_update_job_config()
        .withf(|base: &str, xml: &str| {
            base == "/job/infra"
                && xml.contains("<description>Updated description</description>")
                && xml.contains("<name>shared-lib</name>")
                && xml.contains("plugin=\"workflow-cps-global-lib@2.17\"")
        })
        .return_once(|_, _| Ok(()));

    let state = folder::update(
        &client,
        "infra",
        &folder::FolderConfig {
            name: "infra".to_owned(),
            description: "Updated description".to_owned(),
            display_name: "Original Name".to_owned(),
            ..folder::FolderConfig::default()
        },
    )
    .await
    .expect("update should succeed");
    assert_eq!(state.id, "/job/infra");
}

#[tokio::test]
#[serial]
async fn test_job_create_rejects_a_name_with_path_characters() {
    let client = MockJenkinsClient::new();
    let err = job::create(
        &client,
        &job::JobConfig {
            name: "folder/job-name".to_owned(),
            template: "<project/>".to_owned(),
            ..job::JobConfig::default()
        },
    )
    .await
    .expect_err("a name with path characters must be rejected before any remote call");
    assert!(matches!(err, Error::Validation { .. }), "got: {err}");
}

#[tokio::test]
#[serial]
async fn test_job_update_skips_the_write_when_in_sync() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_get_job()
        .returning(|_, _| Ok(JobRef { base: "/job/pipeline".to_owned() }));
    client.expect_get_job_config().returning(|_| {
        Ok("<?xml version=\"1.0\"?><project>\n  <description>ok</description>\n</project>".to_owned())
    });
    client.expect_update_job_config().times(0);

    let state = job::update(
        &client,
        "pipeline",
        &job::JobConfig {
            name: "pipeline".to_owned(),
            template: "<project><description>ok</description></project>".to_owned(),
            ..job::JobConfig::default()
        },
    )
    .await
    .expect("update should succeed without writing");
    assert_eq!(state.id, "/job/pipeline");
}

#[tokio::test]
#[serial]
async fn test_job_update_writes_the_rendered_template_on_drift() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_get_job()
        .returning(|_, _| Ok(JobRef { base: "/job/pipeline".to_owned() }));
    client
        .expect_get_job_config()
        .returning(|_| Ok("<project><description>stale</description></project>".to_owned()));
    client
        .expect_update_job_config()
        .withf(|base: &str, xml: &str| {
            base == "/job/pipeline" && xml == "<project><description>staging</description></project>"
        })
        .return_once(|_, _| Ok(()));

    job::update(
        &client,
        "pipeline",
        &job::JobConfig {
            name: "pipeline".to_owned(),
            template: "<project><description>{{ parameters.env }}</description></project>"
                .to_owned(),
            parameters: HashMap::from([("env".to_owned(), "staging".to_owned())]),
            ..job::JobConfig::default()
        },
    )
    .await
    .expect("update should succeed");
}

#[tokio::test]
#[serial]
async fn test_job_read_uses_the_remote_base_as_identity() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_get_job()
        .withf(|name: &str, parents: &[String]| name == "job-name" && parents == ["parent"])
        .return_once(|_, _| Ok(JobRef { base: "/job/parent/job/job-name".to_owned() }));
    client
        .expect_get_job_config()
        .withf(|base: &str| base == "/job/parent/job/job-name")
        .return_once(|_| Ok("<project/>".to_owned()));

    let state = job::read(&client, "parent/job/job-name")
        .await
        .expect("read should succeed")
        .expect("job should exist");
    assert_eq!(state.id, "/job/parent/job/job-name");
    assert_eq!(state.name, "job-name");
    assert_eq!(state.folder, "/job/parent");
    assert_eq!(state.template, "<project/>");
}

#[tokio::test]
#[serial]
async fn test_job_delete_tolerates_absence() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_delete_job_in_folder()
        .return_once(|_, _| Err("404 job not found".into()));

    job::delete(&client, "parent/job/gone")
        .await
        .expect("absence after delete is success");
}

#[tokio::test]
#[serial]
async fn test_view_create_assigns_projects() {
    let mut client = MockJenkinsClient::new();
    client.expect_create_view().return_once(|name: &str| {
        Ok(ViewRef {
            name: name.to_owned(),
            url: "http://jenkins.example.com/view/releases/".to_owned(),
            description: String::new(),
        })
    });
    client
        .expect_add_job_to_view()
        .withf(|view: &str, job: &str| view == "releases" && (job == "build" || job == "deploy"))
        .times(2)
        .returning(|_, _| Ok(true));
    client.expect_get_view().return_once(|name: &str| {
        Ok(ViewRef {
            name: name.to_owned(),
            url: "http://jenkins.example.com/view/releases/".to_owned(),
            description: String::new(),
        })
    });

    let state = view::create(
        &client,
        &view::ViewConfig {
            name: "releases".to_owned(),
            assigned_projects: vec!["build".to_owned(), "deploy".to_owned()],
        },
    )
    .await
    .expect("view should be created");
    assert_eq!(state.id, "releases");
    assert_eq!(state.url, "http://jenkins.example.com/view/releases/");
}

#[tokio::test]
#[serial]
async fn test_view_read_reports_absence() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_get_view()
        .return_once(|_| Err("404 view not found".into()));

    let state = view::read(&client, "gone")
        .await
        .expect("an absent view is not an error");
    assert!(state.is_none());
}

#[tokio::test]
#[serial]
async fn test_view_delete_tolerates_absence() {
    let mut client = MockJenkinsClient::new();
    client
        .expect_delete_view()
        .return_once(|_| Err("404 view not found".into()));

    view::delete(&client, "gone")
        .await
        .expect("absence after delete is success");
}
