use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const REFERENCES: &str = "\
{{cite book | title = Foo | author = Mary Smith | date = 2004}}

{{cite journal
 | title = On Bars
 | last = Jones
 | first = Peter
 | date = 1999
 | journal = Journal of Things
}}
";

pub fn mdcite_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("mdcite"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("BIBLIOGRAPHY");
	cmd.env_remove("RUST_LOG");
	cmd
}
