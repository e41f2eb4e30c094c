use std::{fs, path::Path};

use fc_compare::{
	compare_checkout, registry::parse_registry, run, Checkout, Options, RegistryCategory,
	RepositorySource,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const TOPOLOGY: &str = r#"<ResourceSummary>
  <ResourceGroup>
    <GroupName>BNL-ATLAS</GroupName>
    <Facility><Name>Brookhaven National Laboratory</Name></Facility>
    <Site><Name>BNL</Name></Site>
    <Resources>
      <Resource><Name>BNL_ATLAS_1</Name></Resource>
    </Resources>
  </ResourceGroup>
  <ResourceGroup>
    <GroupName>UChicago</GroupName>
    <Site><Name>UC</Name></Site>
    <Resources>
      <Resource><Name>UC_Midway</Name></Resource>
      <Resource><Name>UC</Name></Resource>
    </Resources>
  </ResourceGroup>
</ResourceSummary>"#;

const FACTORY_XML: &str = r#"<glidein>
  <entries>
    <entry name="OSG_US_BNL_ce01" enabled="True">
      <attrs><attr name="GLIDEIN_ResourceName" value="BNL_ATLAS_1"/></attrs>
    </entry>
    <entry name="OSG_US_BNL_site" enabled="True">
      <attrs><attr name="GLIDEIN_ResourceName" value="BNL"/></attrs>
    </entry>
    <entry name="OSG_US_Retired" enabled="True">
      <attrs><attr name="GLIDEIN_ResourceName" value="Retired_CE"/></attrs>
    </entry>
    <entry name="OSG_US_Retired_off" enabled="False">
      <attrs><attr name="GLIDEIN_ResourceName" value="Retired_Too"/></attrs>
    </entry>
  </entries>
</glidein>"#;

const FACTORY_YAML: &str = r#"
UChicago:
  UC_Midway:
    OSG_US_UC_group:
      attrs:
        GLIDEIN_ResourceName:
          value: UChicago
    OSG_US_UC_both:
      attrs:
        GLIDEIN_ResourceName: UC
    OSG_US_Retired:
      attrs:
        GLIDEIN_ResourceName:
          value: Retired_CE
    OSG_US_Typo:
      attrs:
        GLIDEIN_ResourceName:
          value: UC_Midwya
    OSG_US_Broken:
      limits: {}
"#;

fn write(root: &Path, relative: &str, contents: &str) {
	let path = root.join(relative);
	fs::create_dir_all(path.parent().expect("has parent")).expect("create dirs");
	fs::write(path, contents).expect("write fixture");
}

fn factory_checkout() -> TempDir {
	let dir = TempDir::new().expect("temp dir");
	write(dir.path(), "10-bnl.xml", FACTORY_XML);
	write(dir.path(), "OSG_autoconf/UChicago.yml", FACTORY_YAML);
	write(dir.path(), "OSG_autoconf/ignored/nested.yml", FACTORY_YAML);
	dir
}

#[test]
fn compares_local_checkout_against_topology() {
	let dir = factory_checkout();
	let registry = parse_registry(TOPOLOGY, false).expect("valid topology");
	let options = Options {
		repository: RepositorySource::Local(dir.path().to_path_buf()),
		..Options::default()
	};

	let report =
		compare_checkout(&Checkout::local(dir.path()), &registry, &options).expect("compare");

	assert_eq!(report.document_count, 2);
	assert_eq!(report.skipped_entries, 1);

	let mismatches = report
		.mismatches()
		.iter()
		.map(|m| (m.entry.as_str(), m.name.as_str(), m.category))
		.collect::<Vec<_>>();
	assert_eq!(
		mismatches,
		[
			("OSG_US_BNL_site", "BNL", RegistryCategory::Site),
			("OSG_US_UC_group", "UChicago", RegistryCategory::ResourceGroup),
		]
	);

	assert_eq!(
		report.orphans(),
		["OSG_US_Retired", "OSG_US_Retired", "OSG_US_Typo"]
	);

	assert_eq!(
		report.render(),
		"\nFactory entries that match a Topology entity other than a resource: \n\n\
		 - OSG_US_BNL_site: BNL\n\
		 - OSG_US_UC_group: UChicago\n\
		 \nFactory entries that do not match any entity in Topology: \n\n\
		 - OSG_US_Retired\n\
		 - OSG_US_Typo\n\
		 \n"
	);
}

#[test]
fn empty_checkout_reports_nothing() {
	let dir = TempDir::new().expect("temp dir");
	let registry = parse_registry(TOPOLOGY, false).expect("valid topology");

	let report = compare_checkout(&Checkout::local(dir.path()), &registry, &Options::default())
		.expect("compare");

	assert_eq!(report.document_count, 0);
	assert!(report.mismatches().is_empty());
	assert!(report.orphans().is_empty());
}

#[test]
fn malformed_document_aborts_the_comparison() {
	let dir = factory_checkout();
	write(dir.path(), "99-broken.xml", "<glidein><entries>");
	let registry = parse_registry(TOPOLOGY, false).expect("valid topology");

	let err = compare_checkout(&Checkout::local(dir.path()), &registry, &Options::default())
		.unwrap_err();

	assert!(err.is_parse());
}

#[test]
fn unreachable_registry_is_a_fetch_error() {
	let dir = factory_checkout();
	let options = Options {
		registry_url: "http://127.0.0.1:9/rgsummary/xml".to_string(),
		repository: RepositorySource::Local(dir.path().to_path_buf()),
		..Options::default()
	};

	let err = run(&options).unwrap_err();

	assert!(err.is_fetch());
	assert!(dir.path().join("10-bnl.xml").exists());
}
