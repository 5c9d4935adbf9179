//! Payara application-server domains and the JDBC datasource.
//!
//! Every `asadmin` call runs with `AS_JAVA` pointing at the SDKMAN JDK when
//! one is known, so the server does not depend on the login shell's `PATH`.

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use regex::Regex;

use crate::application::exec::{confirm, require_path, resolve_path, run_checked_redacted};
use crate::application::{Host, Step};
use crate::catalog::sdkman::candidate_dir;
use crate::domain::config::{DatasourceConfig, DevstackConfig, DomainConfig};
use crate::domain::context::keys;
use crate::domain::{ExecutionContext, FailurePolicy, StepError};

/// Paths shared by both Payara steps.
struct PayaraPaths {
    home: String,
    sdkman_dir: String,
    java_version: String,
}

impl PayaraPaths {
    fn from_config(config: &DevstackConfig) -> Self {
        Self {
            home: config.payara.home.clone(),
            sdkman_dir: config.sdkman.dir.clone(),
            java_version: config.java.version.clone(),
        }
    }

    fn domains_dir(&self, host: &Host<'_>) -> Result<PathBuf, StepError> {
        Ok(resolve_path(host, &self.home)?.join("glassfish").join("domains"))
    }

    fn domain_xml(&self, host: &Host<'_>, domain: &str) -> Result<PathBuf, StepError> {
        Ok(self
            .domains_dir(host)?
            .join(domain)
            .join("config")
            .join("domain.xml"))
    }

    /// The `asadmin` wrapper, with `AS_JAVA` from the context or the SDKMAN JDK.
    fn asadmin(&self, ctx: &ExecutionContext, host: &Host<'_>) -> Result<Asadmin, StepError> {
        let path = resolve_path(host, &self.home)?.join("bin").join("asadmin");
        require_path(host, &path, "asadmin")?;

        let java_home = match ctx.get(keys::JAVA_HOME) {
            Some(home) => Some(PathBuf::from(home)),
            None => {
                let sdk = resolve_path(host, &self.sdkman_dir)?;
                let dir = candidate_dir(&sdk, "java", &self.java_version);
                host.fs.exists(&dir).then_some(dir)
            }
        };
        Ok(Asadmin::new(&path, java_home.as_deref()))
    }
}

/// Command prefix for `asadmin` invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asadmin {
    program: String,
    prefix: Vec<String>,
}

impl Asadmin {
    #[must_use]
    pub fn new(asadmin: &Path, java_home: Option<&Path>) -> Self {
        let asadmin = asadmin.display().to_string();
        match java_home {
            Some(home) => Self {
                program: "env".to_string(),
                prefix: vec![format!("AS_JAVA={}", home.display()), asadmin],
            },
            None => Self {
                program: asadmin,
                prefix: Vec::new(),
            },
        }
    }

    /// Full argument list for `args`.
    #[must_use]
    pub fn args<'a>(&'a self, args: &[&'a str]) -> Vec<&'a str> {
        self.prefix
            .iter()
            .map(String::as_str)
            .chain(args.iter().copied())
            .collect()
    }

    async fn run(&self, host: &Host<'_>, args: &[&str]) -> Result<Output, StepError> {
        self.run_redacted(host, args, &[]).await
    }

    async fn run_redacted(
        &self,
        host: &Host<'_>,
        args: &[&str],
        secrets: &[&str],
    ) -> Result<Output, StepError> {
        run_checked_redacted(host, &self.program, &self.args(args), secrets).await
    }
}

/// Escape a value for asadmin `--property` syntax (`:` and `=` are separators).
#[must_use]
pub fn escape_property(value: &str) -> String {
    value.replace('\\', "\\\\").replace(':', "\\:").replace('=', "\\=")
}

/// Whether `domain_xml` declares a `<jdbc-connection-pool>` named `pool`.
#[must_use]
pub fn declares_pool(domain_xml: &str, pool: &str) -> bool {
    Regex::new(&format!(
        r#"<jdbc-connection-pool\b[^>]*\sname="{}""#,
        regex::escape(pool)
    ))
    .is_ok_and(|re| re.is_match(domain_xml))
}

/// Admin port of a domain created with `portbase`.
#[must_use]
pub fn admin_port(portbase: u16) -> u16 {
    portbase.saturating_add(48)
}

// ── payara-domains ────────────────────────────────────────────────────────────

/// `payara-domains`: every configured domain exists and is complete.
pub struct PayaraDomainsStep {
    paths: PayaraPaths,
    domains: Vec<DomainConfig>,
}

impl PayaraDomainsStep {
    #[must_use]
    pub fn new(config: &DevstackConfig) -> Self {
        Self {
            paths: PayaraPaths::from_config(config),
            domains: config.payara.domains.clone(),
        }
    }
}

#[async_trait]
impl Step for PayaraDomainsStep {
    fn name(&self) -> &str {
        "payara-domains"
    }

    fn description(&self) -> &str {
        "Create the Payara server domains"
    }

    fn depends_on(&self) -> &[&str] {
        &["java"]
    }

    fn destructive(&self) -> bool {
        true
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        for domain in &self.domains {
            if !host.fs.exists(&self.paths.domain_xml(host, &domain.name)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn apply(&self, ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        let asadmin = self.paths.asadmin(ctx, host)?;
        let domains_dir = self.paths.domains_dir(host)?;
        let mut created = Vec::new();

        for domain in &self.domains {
            let name = domain.name.as_str();
            if host.fs.exists(&self.paths.domain_xml(host, name)?) {
                continue;
            }
            if host.fs.exists(&domains_dir.join(name)) {
                let recreate = confirm(
                    host,
                    &format!("Domain '{name}' exists but has no config/domain.xml. Delete and recreate it?"),
                    false,
                )?;
                if !recreate {
                    return Err(StepError::UserAbort(format!("kept incomplete domain '{name}'")));
                }
                asadmin.run(host, &["delete-domain", name]).await?;
            }
            let portbase = domain.portbase.to_string();
            asadmin
                .run(
                    host,
                    &["create-domain", "--nopassword=true", "--portbase", &portbase, name],
                )
                .await?;
            created.push(name);
        }

        let all: Vec<&str> = self.domains.iter().map(|d| d.name.as_str()).collect();
        ctx.set(keys::PAYARA_DOMAINS, all.join(","))?;
        Ok(format!("created {}", created.join(", ")))
    }
}

// ── payara-datasource ─────────────────────────────────────────────────────────

/// `payara-datasource`: JDBC pool and resource pointing at the database.
pub struct PayaraDatasourceStep {
    paths: PayaraPaths,
    datasource: DatasourceConfig,
    domains: Vec<DomainConfig>,
}

impl PayaraDatasourceStep {
    #[must_use]
    pub fn new(config: &DevstackConfig) -> Self {
        Self {
            paths: PayaraPaths::from_config(config),
            datasource: config.payara.datasource.clone(),
            domains: config.payara.domains.clone(),
        }
    }

    /// Content of the datasource domain's `domain.xml`, if it exists.
    fn domain_xml(&self, host: &Host<'_>) -> Result<Option<String>, StepError> {
        let xml = self.paths.domain_xml(host, &self.datasource.domain)?;
        if !host.fs.exists(&xml) {
            return Ok(None);
        }
        Ok(Some(host.fs.read_to_string(&xml)?))
    }

    fn pool_properties(&self) -> String {
        let ds = &self.datasource;
        format!(
            "user={}:password={}:url={}",
            escape_property(&ds.user),
            escape_property(&ds.password),
            escape_property(&ds.url)
        )
    }
}

#[async_trait]
impl Step for PayaraDatasourceStep {
    fn name(&self) -> &str {
        "payara-datasource"
    }

    fn description(&self) -> &str {
        "Register the Oracle JDBC datasource in Payara"
    }

    fn depends_on(&self) -> &[&str] {
        &["payara-domains", "oracle-db"]
    }

    fn on_failure(&self) -> FailurePolicy {
        FailurePolicy::ContinueWithWarning
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        let jndi = format!("jndi-name=\"{}\"", self.datasource.jndi);
        Ok(self.domain_xml(host)?.is_some_and(|xml| xml.contains(&jndi)))
    }

    async fn apply(&self, ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        let ds = &self.datasource;
        let domain = self
            .domains
            .iter()
            .find(|d| d.name == ds.domain)
            .ok_or_else(|| {
                StepError::PrerequisiteMissing(format!(
                    "datasource domain '{}' is not in payara.domains",
                    ds.domain
                ))
            })?;
        let asadmin = self.paths.asadmin(ctx, host)?;
        let port = admin_port(domain.portbase).to_string();
        let properties = self.pool_properties();
        let escaped_password = escape_property(&ds.password);
        let secrets = [ds.password.as_str(), escaped_password.as_str()];
        // A pool left by an interrupted run is reused.
        let pool_exists = self
            .domain_xml(host)?
            .is_some_and(|xml| declares_pool(&xml, &ds.pool));

        asadmin.run(host, &["start-domain", &ds.domain]).await?;
        let configured = async {
            if pool_exists {
                host.reporter.info(&format!("pool {} already exists, reusing it", ds.pool));
            } else {
                asadmin
                    .run_redacted(
                        host,
                        &[
                            "--port",
                            &port,
                            "create-jdbc-connection-pool",
                            "--datasourceclassname",
                            "oracle.jdbc.pool.OracleDataSource",
                            "--restype",
                            "javax.sql.DataSource",
                            "--property",
                            &properties,
                            &ds.pool,
                        ],
                        &secrets,
                    )
                    .await?;
            }
            asadmin
                .run(
                    host,
                    &["--port", &port, "create-jdbc-resource", "--connectionpoolid", &ds.pool, &ds.jndi],
                )
                .await?;
            Ok::<(), StepError>(())
        }
        .await;

        // Stop regardless of the outcome so a re-run starts from a clean state.
        let stopped = asadmin.run(host, &["stop-domain", &ds.domain]).await;
        configured?;
        if let Err(e) = stopped {
            host.reporter.warn(&format!("could not stop domain '{}': {e}", ds.domain));
        }
        Ok(format!("{} -> pool {} in domain '{}'", ds.jndi, ds.pool, ds.domain))
    }
}
