//! Catalog steps against mocked ports.

#![allow(clippy::expect_used)]

use std::time::Duration;

use devstack_cli::application::ports::Level;
use devstack_cli::application::{Sequencer, Step};
use devstack_cli::catalog;
use devstack_cli::catalog::docker::DockerStep;
use devstack_cli::catalog::maven_settings::MavenSettingsStep;
use devstack_cli::catalog::oracle::{OracleStep, READY_MARKER};
use devstack_cli::catalog::payara::{PayaraDatasourceStep, PayaraDomainsStep};
use devstack_cli::catalog::sdkman::{CandidateStep, SdkmanStep};
use devstack_cli::catalog::source_patch::SourcePatchStep;
use devstack_cli::commands::run::seed_context;
use devstack_cli::domain::context::keys;
use devstack_cli::domain::{
    DevstackConfig, ExecutionContext, Platform, RunStatus, Selection, StepError, StepOutcome,
};

use crate::mocks::{MockFs, MockPrompter, MockRunner, TestHost, err_output, ok_output};

const FAST: Duration = Duration::from_millis(5);
const SDKMAN: &str = "/home/dev/.sdkman";
const ASADMIN: &str = "/home/dev/payara6/bin/asadmin";
const DOMAIN_XML: &str = "/home/dev/payara6/glassfish/domains/domain1/config/domain.xml";

fn config() -> DevstackConfig {
    let mut config = DevstackConfig::default();
    config.source.dir = "/work/app".to_string();
    config.source.patch = "/work/local.patch".to_string();
    config
}

fn ctx(platform: Platform) -> ExecutionContext {
    ExecutionContext::for_platform(platform)
}

// ============================================================================
// docker
// ============================================================================

#[tokio::test]
async fn test_docker_satisfied_when_server_is_recent() {
    let t = TestHost::new(
        MockRunner::new().on("docker version", ok_output(b"24.0.7\n")),
        MockFs::new(),
    );
    let step = DockerStep::new(config().docker);
    assert!(step.is_satisfied(&ctx(Platform::Debian), &t.host()).await.expect("check"));
}

#[tokio::test]
async fn test_docker_not_satisfied_when_server_is_old_or_down() {
    let old = TestHost::new(
        MockRunner::new().on("docker version", ok_output(b"19.03.12\n")),
        MockFs::new(),
    );
    let down = TestHost::default();
    let step = DockerStep::new(config().docker);
    assert!(!step.is_satisfied(&ctx(Platform::Debian), &old.host()).await.expect("check"));
    assert!(!step.is_satisfied(&ctx(Platform::Debian), &down.host()).await.expect("check"));
}

#[tokio::test]
async fn test_docker_apply_installs_and_starts_with_platform_commands() {
    let runner = MockRunner::new()
        .on("sudo apt-get install", ok_output(b""))
        .on("sudo systemctl enable --now docker", ok_output(b""))
        .once("docker info", err_output(1, b"Cannot connect to the Docker daemon"))
        .on("docker info", ok_output(b""))
        .on("docker version", ok_output(b"24.0.7\n"));
    let t = TestHost::new(runner, MockFs::new());
    let step = DockerStep::new(config().docker).with_poll(FAST);

    let message = step
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect("apply");

    assert_eq!(message, "Docker 24.0.7 running");
    let calls = t.runner.calls();
    let install = calls.iter().position(|c| c.starts_with("sudo apt-get install")).expect("install");
    let start = calls.iter().position(|c| c.starts_with("sudo systemctl")).expect("start");
    assert!(install < start);
}

#[tokio::test]
async fn test_docker_apply_without_platform_variant_is_prerequisite_missing() {
    let t = TestHost::default();
    let err = DockerStep::new(config().docker)
        .apply(&mut ctx(Platform::Other), &t.host())
        .await
        .expect_err("no installer");
    assert!(matches!(err, StepError::PrerequisiteMissing(_)), "{err}");
    assert!(t.runner.calls().is_empty());
}

#[tokio::test]
async fn test_docker_daemon_wait_is_bounded() {
    let mut cfg = config().docker;
    cfg.ready_timeout_secs = 1;
    let t = TestHost::new(
        MockRunner::new().on("sudo systemctl", ok_output(b"")),
        MockFs::new().with_programs(&["docker"]),
    );
    let err = DockerStep::new(cfg)
        .with_poll(FAST)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("daemon never starts");
    assert!(matches!(err, StepError::TimeoutExceeded { seconds: 1, .. }), "{err}");
}

// ============================================================================
// sdkman, java, maven
// ============================================================================

#[tokio::test]
async fn test_sdkman_requires_curl() {
    let t = TestHost::new(MockRunner::new(), MockFs::new().with_programs(&["bash"]));
    let err = SdkmanStep::new(config().sdkman)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("curl missing");
    assert!(matches!(err, StepError::PrerequisiteMissing(ref m) if m.contains("curl")), "{err}");
    assert!(t.runner.calls().is_empty());
}

#[tokio::test]
async fn test_sdkman_satisfied_by_init_script() {
    let t = TestHost::new(
        MockRunner::new(),
        MockFs::new().with_file(format!("{SDKMAN}/bin/sdkman-init.sh"), ""),
    );
    let step = SdkmanStep::new(config().sdkman);
    assert!(step.is_satisfied(&ctx(Platform::Debian), &t.host()).await.expect("check"));
}

#[tokio::test]
async fn test_java_apply_installs_pinned_version_and_records_home() {
    let home = format!("{SDKMAN}/candidates/java/17.0.9-tem");
    let t = TestHost::new(
        MockRunner::new().on("bash -c", ok_output(b"")),
        MockFs::new()
            .with_file(format!("{SDKMAN}/bin/sdkman-init.sh"), "")
            .with_dir(&home),
    );
    let mut ctx = ctx(Platform::Debian);

    CandidateStep::java(&config())
        .apply(&mut ctx, &t.host())
        .await
        .expect("apply");

    assert!(t.runner.calls()[0].contains("sdk install java 17.0.9-tem"));
    assert_eq!(ctx.get(keys::JAVA_HOME), Some(home.as_str()));
}

#[tokio::test]
async fn test_candidate_missing_after_install_fails() {
    let t = TestHost::new(
        MockRunner::new().on("bash -c", ok_output(b"")),
        MockFs::new().with_file(format!("{SDKMAN}/bin/sdkman-init.sh"), ""),
    );
    let err = CandidateStep::maven(&config())
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("not installed");
    assert!(matches!(err, StepError::PrerequisiteMissing(_)), "{err}");
}

// ============================================================================
// maven-settings
// ============================================================================

#[tokio::test]
async fn test_maven_settings_written_with_mirror() {
    let mut cfg = config().maven;
    cfg.mirror_url = Some("https://nexus.internal/repository/maven".to_string());
    let t = TestHost::default();
    let step = MavenSettingsStep::new(cfg);
    let mut ctx = ctx(Platform::Debian);

    assert!(!step.is_satisfied(&ctx, &t.host()).await.expect("check"));
    step.apply(&mut ctx, &t.host()).await.expect("apply");

    let written = t.fs.file("/home/dev/.m2/settings.xml").expect("settings written");
    assert!(written.contains("<url>https://nexus.internal/repository/maven</url>"));
    assert_eq!(ctx.get(keys::MAVEN_SETTINGS), Some("/home/dev/.m2/settings.xml"));
    assert!(step.is_satisfied(&ctx, &t.host()).await.expect("check"));
}

// ============================================================================
// source-patch
// ============================================================================

fn patch_fs() -> MockFs {
    MockFs::new()
        .with_programs(&["git"])
        .with_dir("/work/app")
        .with_file("/work/local.patch", "diff --git a/x b/x\n")
}

#[tokio::test]
async fn test_patch_already_applied_is_satisfied() {
    let t = TestHost::new(
        MockRunner::new().on("git -C /work/app apply --check --reverse", ok_output(b"")),
        patch_fs(),
    );
    let step = SourcePatchStep::new(config().source);
    assert!(step.is_satisfied(&ctx(Platform::Debian), &t.host()).await.expect("check"));
}

#[tokio::test]
async fn test_patch_applies_after_dry_run() {
    let t = TestHost::new(
        MockRunner::new()
            .on("git -C /work/app apply --check /work/local.patch", ok_output(b""))
            .on("git -C /work/app apply /work/local.patch", ok_output(b"")),
        patch_fs(),
    );
    SourcePatchStep::new(config().source)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect("apply");
    assert_eq!(
        t.runner.calls(),
        [
            "git -C /work/app apply --check /work/local.patch",
            "git -C /work/app apply /work/local.patch",
        ]
    );
}

#[tokio::test]
async fn test_patch_that_applies_neither_way_is_never_forced() {
    let t = TestHost::new(
        MockRunner::new().on(
            "git -C /work/app apply",
            err_output(1, b"error: patch failed: x:1"),
        ),
        patch_fs(),
    );
    let step = SourcePatchStep::new(config().source);
    let mut ctx = ctx(Platform::Debian);

    assert!(!step.is_satisfied(&ctx, &t.host()).await.expect("check"));
    let err = step.apply(&mut ctx, &t.host()).await.expect_err("conflict");

    assert!(err.to_string().contains("neither applies cleanly"), "{err}");
    assert!(!t.runner.calls().iter().any(|c| c == "git -C /work/app apply /work/local.patch"));
}

#[tokio::test]
async fn test_patch_without_git_is_prerequisite_missing() {
    let t = TestHost::new(
        MockRunner::new(),
        MockFs::new().with_dir("/work/app").with_file("/work/local.patch", ""),
    );
    let err = SourcePatchStep::new(config().source)
        .is_satisfied(&ctx(Platform::Debian), &t.host())
        .await
        .expect_err("git missing");
    assert!(matches!(err, StepError::PrerequisiteMissing(_)), "{err}");
}

// ============================================================================
// oracle-db
// ============================================================================

fn oracle(timeout_secs: u64) -> OracleStep {
    let mut cfg = config().oracle;
    cfg.ready_timeout_secs = timeout_secs;
    OracleStep::new(cfg).with_poll(FAST)
}

#[tokio::test]
async fn test_oracle_running_container_is_satisfied() {
    let t = TestHost::new(
        MockRunner::new().on("docker inspect", ok_output(b"running\n")),
        MockFs::new(),
    );
    assert!(oracle(600).is_satisfied(&ctx(Platform::Debian), &t.host()).await.expect("check"));
}

#[tokio::test]
async fn test_oracle_missing_container_is_created_and_awaited() {
    let runner = MockRunner::new()
        .on("docker run -d --name devstack-oracle", ok_output(b"abc123\n"))
        .once("docker logs", ok_output(b"Starting...\n"))
        .on("docker logs", ok_output(format!("{READY_MARKER}\n").as_bytes()));
    let t = TestHost::new(runner, MockFs::new().with_programs(&["docker"]));
    let mut ctx = ctx(Platform::Debian);

    let message = oracle(600).apply(&mut ctx, &t.host()).await.expect("apply");

    assert!(message.contains("created"), "{message}");
    assert!(t.runner.called("docker run -d --name devstack-oracle -p 1521:1521"));
    assert_eq!(ctx.get(keys::ORACLE_CONTAINER), Some("devstack-oracle"));
    assert!(t.prompter.asked().is_empty());
}

#[tokio::test]
async fn test_oracle_confirmed_recreate_removes_container() {
    let runner = MockRunner::new()
        .on("docker inspect", ok_output(b"exited\n"))
        .on("docker rm -f devstack-oracle", ok_output(b""))
        .on("docker run -d", ok_output(b""))
        .on("docker logs", ok_output(READY_MARKER.as_bytes()));
    let t = TestHost::new(runner, MockFs::new().with_programs(&["docker"]))
        .with_prompter(MockPrompter::answering(&[true]));

    let message = oracle(600)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect("apply");

    assert!(message.contains("recreated"), "{message}");
    assert!(t.runner.called("docker rm -f devstack-oracle"));
    assert_eq!(t.prompter.asked().len(), 1);
    assert_eq!(t.prompter.defaults(), [false]);
    assert!(t.reporter.holds() >= 1);
}

#[tokio::test]
async fn test_oracle_unanswered_recreate_keeps_container() {
    let runner = MockRunner::new()
        .on("docker inspect", ok_output(b"exited\n"))
        .on("docker start devstack-oracle", ok_output(b""))
        .on("docker logs", ok_output(READY_MARKER.as_bytes()));
    let t = TestHost::new(runner, MockFs::new().with_programs(&["docker"]));

    let message = oracle(600)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect("apply");

    assert!(message.contains("restarted"), "{message}");
    assert!(!t.runner.called("docker rm"));
}

#[tokio::test]
async fn test_oracle_restart_ignores_marker_from_previous_boot() {
    let old_log = format!("{READY_MARKER}\nSHUTDOWN: normal\n");
    let runner = MockRunner::new()
        .on("docker inspect", ok_output(b"exited\n"))
        .on("docker start devstack-oracle", ok_output(b""))
        .on("docker logs --since", ok_output(b"Starting Oracle Net Listener\n"))
        .on("docker logs devstack-oracle", ok_output(old_log.as_bytes()));
    let t = TestHost::new(runner, MockFs::new().with_programs(&["docker"]))
        .with_prompter(MockPrompter::answering(&[false]));

    let err = oracle(1)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("old marker must not count");

    assert!(matches!(err, StepError::TimeoutExceeded { .. }), "{err}");
    assert!(!t.runner.called("docker logs devstack-oracle"));
}

#[tokio::test]
async fn test_oracle_failure_message_hides_password() {
    let mut cfg = config().oracle;
    cfg.password = "s3cr3t".to_string();
    let runner = MockRunner::new().on(
        "docker run -d",
        err_output(125, b"bad ORACLE_PASSWORD=s3cr3t"),
    );
    let t = TestHost::new(runner, MockFs::new().with_programs(&["docker"]));

    let err = OracleStep::new(cfg)
        .with_poll(FAST)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("docker run fails");

    let message = err.to_string();
    assert!(matches!(err, StepError::ExternalCommandFailed { .. }), "{message}");
    assert!(!message.contains("s3cr3t"), "{message}");
    assert!(message.contains("ORACLE_PASSWORD=***"), "{message}");
}

#[tokio::test]
async fn test_oracle_declined_recreate_restarts_existing_container() {
    let runner = MockRunner::new()
        .on("docker inspect", ok_output(b"exited\n"))
        .on("docker start devstack-oracle", ok_output(b""))
        .on("docker logs", ok_output(READY_MARKER.as_bytes()));
    let t = TestHost::new(runner, MockFs::new().with_programs(&["docker"]))
        .with_prompter(MockPrompter::answering(&[false]));

    let message = oracle(600)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect("apply");

    assert!(message.contains("restarted"), "{message}");
    assert!(!t.runner.called("docker rm"));
    assert!(!t.runner.called("docker run"));
}

#[tokio::test]
async fn test_oracle_readiness_wait_times_out() {
    let runner = MockRunner::new()
        .on("docker run -d", ok_output(b""))
        .on("docker logs", ok_output(b"still starting\n"));
    let t = TestHost::new(runner, MockFs::new().with_programs(&["docker"]));

    let err = oracle(1)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("never ready");
    assert!(matches!(err, StepError::TimeoutExceeded { .. }), "{err}");
}

// ============================================================================
// payara-domains, payara-datasource
// ============================================================================

#[tokio::test]
async fn test_domains_created_with_java_from_context() {
    let t = TestHost::new(
        MockRunner::new().on("env AS_JAVA=/opt/jdk", ok_output(b"")),
        MockFs::new().with_file(ASADMIN, ""),
    );
    let mut ctx = ctx(Platform::Debian);
    ctx.set(keys::JAVA_HOME, "/opt/jdk").expect("set");
    let step = PayaraDomainsStep::new(&config());

    assert!(!step.is_satisfied(&ctx, &t.host()).await.expect("check"));
    step.apply(&mut ctx, &t.host()).await.expect("apply");

    assert_eq!(
        t.runner.calls(),
        [format!(
            "env AS_JAVA=/opt/jdk {ASADMIN} create-domain --nopassword=true --portbase 4800 domain1"
        )]
    );
    assert_eq!(ctx.get(keys::PAYARA_DOMAINS), Some("domain1"));
}

#[tokio::test]
async fn test_incomplete_domain_declined_is_user_abort() {
    let t = TestHost::new(
        MockRunner::new(),
        MockFs::new()
            .with_file(ASADMIN, "")
            .with_dir("/home/dev/payara6/glassfish/domains/domain1"),
    )
    .with_prompter(MockPrompter::answering(&[false]));

    let err = PayaraDomainsStep::new(&config())
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("declined");

    assert!(matches!(err, StepError::UserAbort(_)), "{err}");
    assert!(t.runner.calls().is_empty());
}

#[tokio::test]
async fn test_incomplete_domain_kept_when_unattended() {
    let t = TestHost::new(
        MockRunner::new(),
        MockFs::new()
            .with_file(ASADMIN, "")
            .with_dir("/home/dev/payara6/glassfish/domains/domain1"),
    );

    let err = PayaraDomainsStep::new(&config())
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("default is no");

    assert!(matches!(err, StepError::UserAbort(_)), "{err}");
    assert_eq!(t.prompter.defaults(), [false]);
    assert!(!t.runner.called(&format!("{ASADMIN} delete-domain")));
}

#[tokio::test]
async fn test_domains_require_asadmin() {
    let t = TestHost::default();
    let err = PayaraDomainsStep::new(&config())
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("no asadmin");
    assert!(matches!(err, StepError::PrerequisiteMissing(_)), "{err}");
}

#[tokio::test]
async fn test_datasource_satisfied_when_jndi_declared() {
    let t = TestHost::new(
        MockRunner::new(),
        MockFs::new().with_file(
            DOMAIN_XML,
            r#"<jdbc-resource pool-name="OraclePool" jndi-name="jdbc/OracleDS"></jdbc-resource>"#,
        ),
    );
    let step = PayaraDatasourceStep::new(&config());
    assert!(step.is_satisfied(&ctx(Platform::Debian), &t.host()).await.expect("check"));
}

#[tokio::test]
async fn test_datasource_creates_pool_and_resource_on_admin_port() {
    let t = TestHost::new(
        MockRunner::new().on(ASADMIN, ok_output(b"")),
        MockFs::new().with_file(ASADMIN, "").with_file(DOMAIN_XML, "<domain/>"),
    );
    PayaraDatasourceStep::new(&config())
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect("apply");

    let calls = t.runner.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], format!("{ASADMIN} start-domain domain1"));
    assert!(calls[1].contains("--port 4848 create-jdbc-connection-pool"));
    assert!(calls[1].contains(r"url=jdbc\:oracle\:thin\:@localhost\:1521/XEPDB1"));
    assert!(calls[2].ends_with("create-jdbc-resource --connectionpoolid OraclePool jdbc/OracleDS"));
    assert_eq!(calls[3], format!("{ASADMIN} stop-domain domain1"));
}

#[tokio::test]
async fn test_datasource_stops_domain_after_failure() {
    let t = TestHost::new(
        MockRunner::new()
            .on(&format!("{ASADMIN} --port 4848 create-jdbc-connection-pool"), err_output(1, b"pool exists"))
            .on(ASADMIN, ok_output(b"")),
        MockFs::new().with_file(ASADMIN, ""),
    );
    let err = PayaraDatasourceStep::new(&config())
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("pool creation fails");

    assert!(matches!(err, StepError::ExternalCommandFailed { .. }), "{err}");
    assert!(t.runner.called(&format!("{ASADMIN} stop-domain domain1")));
    assert!(!t.runner.called(&format!("{ASADMIN} --port 4848 create-jdbc-resource")));
}

#[tokio::test]
async fn test_datasource_reuses_pool_left_by_interrupted_run() {
    let xml = r#"<resources><jdbc-connection-pool datasource-classname="oracle.jdbc.pool.OracleDataSource" name="OraclePool" res-type="javax.sql.DataSource"></jdbc-connection-pool></resources>"#;
    let t = TestHost::new(
        MockRunner::new()
            .on(
                &format!("{ASADMIN} --port 4848 create-jdbc-connection-pool"),
                err_output(1, b"A resource named OraclePool already exists."),
            )
            .on(ASADMIN, ok_output(b"")),
        MockFs::new().with_file(ASADMIN, "").with_file(DOMAIN_XML, xml),
    );
    let step = PayaraDatasourceStep::new(&config());
    let mut ctx = ctx(Platform::Debian);

    assert!(!step.is_satisfied(&ctx, &t.host()).await.expect("check"));
    step.apply(&mut ctx, &t.host()).await.expect("apply");

    assert!(!t.runner.called(&format!("{ASADMIN} --port 4848 create-jdbc-connection-pool")));
    assert!(t.runner.called(&format!(
        "{ASADMIN} --port 4848 create-jdbc-resource --connectionpoolid OraclePool jdbc/OracleDS"
    )));
    assert!(t.reporter.has(Level::Info, "reusing"));
}

#[tokio::test]
async fn test_datasource_failure_message_hides_password() {
    let mut cfg = config();
    cfg.payara.datasource.password = "pa:ss".to_string();
    let t = TestHost::new(
        MockRunner::new()
            .on(
                &format!("{ASADMIN} --port 4848 create-jdbc-connection-pool"),
                err_output(1, b"rejected password=pa\\:ss"),
            )
            .on(ASADMIN, ok_output(b"")),
        MockFs::new().with_file(ASADMIN, ""),
    );

    let err = PayaraDatasourceStep::new(&cfg)
        .apply(&mut ctx(Platform::Debian), &t.host())
        .await
        .expect_err("pool creation fails");

    let message = err.to_string();
    assert!(!message.contains("pa:ss"), "{message}");
    assert!(!message.contains(r"pa\:ss"), "{message}");
    assert!(message.contains("password=***"), "{message}");
}

// ============================================================================
// Whole catalog
// ============================================================================

#[tokio::test]
async fn test_provisioned_host_skips_every_step() {
    let runner = MockRunner::new()
        .on("docker version", ok_output(b"24.0.7\n"))
        .on("docker inspect", ok_output(b"running\n"))
        .on("git -C /work/app apply --check --reverse", ok_output(b""));
    let fs = MockFs::new()
        .with_programs(&["docker", "git", "curl", "bash"])
        .with_file(format!("{SDKMAN}/bin/sdkman-init.sh"), "")
        .with_dir(format!("{SDKMAN}/candidates/java/17.0.9-tem"))
        .with_dir(format!("{SDKMAN}/candidates/maven/3.9.6"))
        .with_file("/home/dev/.m2/settings.xml", "<settings/>")
        .with_dir("/work/app")
        .with_file("/work/local.patch", "")
        .with_file(DOMAIN_XML, r#"<jdbc-resource jndi-name="jdbc/OracleDS"/>"#);
    let t = TestHost::new(runner, fs);
    let seq = Sequencer::new(catalog::build(&config()).expect("catalog"));

    let report = seq
        .run(&Selection::All, &mut ctx(Platform::Debian), &t.host())
        .await
        .expect("run");

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.entries.len(), 9);
    assert!(report.entries.iter().all(|e| e.outcome == StepOutcome::Skipped));
    assert!(t.prompter.asked().is_empty());
}

#[tokio::test]
async fn test_missing_docker_on_unknown_platform_aborts_dependents() {
    let t = TestHost::default();
    let seq = Sequencer::new(catalog::build(&config()).expect("catalog"));

    let report = seq
        .run(&Selection::one("oracle-db"), &mut ctx(Platform::Other), &t.host())
        .await
        .expect("run");

    assert_eq!(report.status, RunStatus::Aborted);
    assert_eq!(report.outcome_of("docker"), Some(StepOutcome::Failed));
    assert_eq!(report.outcome_of("oracle-db"), None);
}

// ============================================================================
// Context values
// ============================================================================

#[tokio::test]
async fn test_java_home_not_overwritten_without_confirmation() {
    let home = format!("{SDKMAN}/candidates/java/17.0.9-tem");
    let t = TestHost::new(
        MockRunner::new().on("bash -c", ok_output(b"")),
        MockFs::new()
            .with_file(format!("{SDKMAN}/bin/sdkman-init.sh"), "")
            .with_dir(&home),
    )
    .with_prompter(MockPrompter::answering(&[false]));
    let mut ctx = ctx(Platform::Debian);
    ctx.set(keys::JAVA_HOME, "/usr/lib/jvm/default").expect("set");

    CandidateStep::java(&config())
        .apply(&mut ctx, &t.host())
        .await
        .expect("apply");

    assert_eq!(ctx.get(keys::JAVA_HOME), Some("/usr/lib/jvm/default"));
    assert_eq!(t.prompter.asked().len(), 1);
}

#[tokio::test]
async fn test_inherited_java_home_kept_when_unattended() {
    let home = format!("{SDKMAN}/candidates/java/17.0.9-tem");
    let t = TestHost::new(
        MockRunner::new().on("bash -c", ok_output(b"")),
        MockFs::new()
            .with_file(format!("{SDKMAN}/bin/sdkman-init.sh"), "")
            .with_dir(&home),
    );
    let mut ctx = ctx(Platform::Debian);
    seed_context(&mut ctx, |var| (var == "JAVA_HOME").then(|| "/usr/lib/jvm/java-11".to_string()));

    CandidateStep::java(&config())
        .apply(&mut ctx, &t.host())
        .await
        .expect("apply");

    assert_eq!(ctx.get(keys::JAVA_HOME), Some("/usr/lib/jvm/java-11"));
    assert_eq!(t.prompter.defaults(), [false]);
    assert!(t.reporter.has(Level::Warn, "keeping java_home"));
}

#[tokio::test]
async fn test_java_home_replaced_after_confirmation() {
    let home = format!("{SDKMAN}/candidates/java/17.0.9-tem");
    let t = TestHost::new(
        MockRunner::new().on("bash -c", ok_output(b"")),
        MockFs::new()
            .with_file(format!("{SDKMAN}/bin/sdkman-init.sh"), "")
            .with_dir(&home),
    )
    .with_prompter(MockPrompter::answering(&[true]));
    let mut ctx = ctx(Platform::Debian);
    ctx.set(keys::JAVA_HOME, "/usr/lib/jvm/default").expect("set");

    CandidateStep::java(&config())
        .apply(&mut ctx, &t.host())
        .await
        .expect("apply");

    assert_eq!(ctx.get(keys::JAVA_HOME), Some(home.as_str()));
}
