use std::io::Cursor;

use pdebundle_lib::archive::ArchiveBuilder;
use pdebundle_lib::{BundleOptions, ErrorKind, assemble, assemble_with};
use zip::CompressionMethod;

use super::common::{TestProject, entries, entry_bytes, names};

#[test]
fn build_instructions_win_over_compiled_outputs() {
  let project = TestProject::new();
  project.write_file("build.properties", "bin.includes = plugin.xml,\\\n  .\n");
  project.write_file("plugin.xml", "from instructions");
  project.write_file("bin/plugin.xml", "from outputs");
  project.write_file("bin/com/example/Activator.class", "class");

  let bytes = assemble(project.path()).unwrap();

  let plugin: Vec<_> = entries(&bytes).into_iter().filter(|(name, _)| name == "plugin.xml").collect();
  assert_eq!(plugin, vec![("plugin.xml".to_string(), "from instructions".to_string())]);
  assert!(names(&bytes).contains(&"com/example/Activator.class".to_string()));
}

#[test]
fn entry_paths_never_contain_backslashes() {
  let project = TestProject::new();
  project.write_file("build.properties", "bin.includes = META-INF/,icons/,.\n");
  project.write_file("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n");
  project.write_file("icons/obj16/add.gif", "gif");
  project.write_file("bin/a/b/C.class", "c");

  let bytes = assemble(project.path()).unwrap();

  let names = names(&bytes);
  assert_eq!(names.len(), 3);
  assert!(names.iter().all(|name| !name.contains('\\')));
  assert!(names.contains(&"icons/obj16/add.gif".to_string()));
}

#[test]
fn host_separators_in_target_paths_are_normalized() {
  let project = TestProject::bare();
  project.write_file("classes/p/Q.class", "q");

  let mut archive = ArchiveBuilder::new(Cursor::new(Vec::new()), BundleOptions::default());
  archive.write_directory(r"lib\classes", &project.join("classes"), 0).unwrap();
  archive.write_file(r"META-INF\MANIFEST.MF", &project.join("classes/p/Q.class")).unwrap();
  let bytes = archive.finish().unwrap().into_inner();

  assert_eq!(names(&bytes), vec!["lib/classes/p/Q.class", "META-INF/MANIFEST.MF"]);
}

#[test]
fn mapped_library_becomes_nested_archive() {
  let project = TestProject::new();
  project.write_file(
    "build.properties",
    "bin.includes = META-INF/,.,lib/helper.jar\noutput.lib/helper.jar = helper-bin/\n",
  );
  project.write_file("META-INF/MANIFEST.MF", "Bundle-ClassPath: .,lib/helper.jar\n");
  project.write_file("helper-bin/Helper.class", "helper");

  let bytes = assemble(project.path()).unwrap();

  let mut outer = zip::ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
  let nested_entry = outer.by_name("lib/helper.jar").unwrap();
  assert_eq!(nested_entry.compression(), CompressionMethod::Stored);
  drop(nested_entry);
  assert!(!names(&bytes).iter().any(|name| name.starts_with("lib/helper.jar/")));

  let nested = entry_bytes(&bytes, "lib/helper.jar");
  assert_eq!(entries(&nested), vec![("Helper.class".to_string(), "helper".to_string())]);
}

#[test]
fn all_entries_are_stored() {
  let project = TestProject::new();
  project.write_file("bin/big.txt", &"compressible ".repeat(1000));

  let bytes = assemble(project.path()).unwrap();

  let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
  let file = archive.by_name("big.txt").unwrap();
  assert_eq!(file.compression(), CompressionMethod::Stored);
  assert_eq!(file.compressed_size(), file.size());
}

#[test]
fn default_instructions_without_metadata() {
  let project = TestProject::new();
  project.write_file("bin/Only.class", "only");

  let bytes = assemble(project.path()).unwrap();

  assert_eq!(entries(&bytes), vec![("Only.class".to_string(), "only".to_string())]);
}

#[test]
fn default_instructions_include_metadata() {
  let project = TestProject::new();
  project.write_file("bin/Only.class", "only");
  project.write_file("META-INF/MANIFEST.MF", "Bundle-SymbolicName: demo\n");

  let bytes = assemble(project.path()).unwrap();

  assert_eq!(names(&bytes), vec!["META-INF/MANIFEST.MF", "Only.class"]);
}

#[test]
fn missing_output_directory_is_not_an_error() {
  let project = TestProject::new();
  project.write_file("META-INF/MANIFEST.MF", "m");

  let bytes = assemble(project.path()).unwrap();

  assert_eq!(names(&bytes), vec!["META-INF/MANIFEST.MF"]);
}

#[test]
fn missing_direct_resource_fails_the_assembly() {
  let project = TestProject::new();
  project.write_file("build.properties", "bin.includes = META-INF/,about.html,.\n");
  project.write_file("META-INF/MANIFEST.MF", "m");

  let err = assemble(project.path()).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::MissingResource);
}

#[test]
fn missing_classpath_fails_the_assembly() {
  let project = TestProject::bare();
  project.write_file("build.properties", "bin.includes = .\n");

  let err = assemble(project.path()).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::MissingDescriptor);
}

#[test]
fn malformed_classpath_fails_the_assembly() {
  let project = TestProject::bare();
  project.write_file(".classpath", "<classpath><classpathentry path=\"bin\"/></classpath>");

  let err = assemble(project.path()).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::MalformedDescriptor);
}

#[test]
fn unparseable_classpath_fails_the_assembly() {
  for content in ["this is not xml at all", "", r#"<classpath><classpathentry kind="output" path="bin"/>"#] {
    let project = TestProject::bare();
    project.write_file(".classpath", content);
    project.write_file("bin/A.class", "a");

    let err = assemble(project.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedDescriptor, "accepted {:?}", content);
  }
}

#[cfg(unix)]
#[test]
fn absolute_include_outside_project_is_not_packed() {
  let outside = tempfile::TempDir::new().unwrap();
  std::fs::create_dir_all(outside.path().join("secret")).unwrap();
  std::fs::write(outside.path().join("secret/key.txt"), "key").unwrap();

  let project = TestProject::new();
  project.write_file(
    "build.properties",
    &format!("bin.includes = {}/secret,.\n", outside.path().display()),
  );
  project.write_file("bin/A.class", "a");

  let err = assemble(project.path()).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::MissingResource);
}

#[test]
fn absolute_include_resolves_under_project() {
  let project = TestProject::new();
  project.write_file(
    "build.properties",
    "bin.includes = /docs,/lib/util.jar,.\noutput./lib/util.jar = /util-bin\n",
  );
  project.write_file("docs/readme.txt", "read me");
  project.write_file("util-bin/U.class", "u");

  let bytes = assemble(project.path()).unwrap();

  assert_eq!(names(&bytes), vec!["docs/readme.txt", "lib/util.jar"]);
  assert!(names(&bytes).iter().all(|name| !name.starts_with('/')));
}

#[cfg(unix)]
#[test]
fn deep_tree_fails_with_recursion_limit() {
  let project = TestProject::new();
  let mut deep = String::from("bin");
  for _ in 0..300 {
    deep.push_str("/d");
  }
  project.write_file(&format!("{}/leaf.txt", deep), "leaf");

  let err = assemble(project.path()).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::RecursionLimitExceeded);
}

#[test]
fn configured_depth_limit_applies_to_outputs() {
  let project = TestProject::new();
  project.write_file("bin/a/b/c/D.class", "d");

  let options = BundleOptions {
    max_depth: 2,
    ..BundleOptions::default()
  };
  let err = assemble_with(project.path(), &options).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::RecursionLimitExceeded);
}

#[test]
fn several_output_directories_merge_at_root() {
  let project = TestProject::bare();
  project.write_file(
    ".classpath",
    r#"<classpath>
  <classpathentry kind="src" output="bin-gen" path="gen"/>
  <classpathentry kind="src" path="src"/>
  <classpathentry kind="output" path="bin"/>
</classpath>"#,
  );
  project.write_file("bin/A.class", "a");
  project.write_file("bin-gen/G.class", "g");

  let bundle = assemble_with(project.path(), &BundleOptions::default()).unwrap();

  let mut names = names(bundle.bytes());
  names.sort();
  assert_eq!(names, vec!["A.class", "G.class"]);
  assert_eq!(bundle.entries().len(), 2);
}

#[test]
fn assembly_is_reproducible() {
  let project = TestProject::new();
  project.write_file("build.properties", "bin.includes = META-INF/,.,lib/x.jar\noutput.lib/x.jar = xbin\n");
  project.write_file("META-INF/MANIFEST.MF", "m");
  project.write_file("xbin/X.class", "x");
  project.write_file("bin/A.class", "a");

  assert_eq!(assemble(project.path()).unwrap(), assemble(project.path()).unwrap());
}
