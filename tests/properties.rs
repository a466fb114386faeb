use proptest::prelude::*;
use procmem::system::locator::{LocateResult, find_process_by_cmdline};
use procmem::system::memory::{MemoryReading, parse_status};
use procmem::system::static_table::StaticProcessTable;

const LIMIT: usize = 1023;

fn table_from(cmdlines: &[String]) -> StaticProcessTable {
    cmdlines
        .iter()
        .enumerate()
        .fold(StaticProcessTable::new(), |table, (i, cmd)| {
            table.with_process(i as u32 + 100, &[cmd.as_str()], "")
        })
}

proptest! {
    #[test]
    fn no_match_is_not_found(
        cmdlines in prop::collection::vec("[a-m /._-]{0,40}", 0..20),
    ) {
        // The alphabet excludes 'n' and 'o', so "node" cannot appear.
        let table = table_from(&cmdlines);
        prop_assert_eq!(find_process_by_cmdline(&table, "node", LIMIT), LocateResult::NotFound);
    }

    #[test]
    fn single_match_is_found(
        cmdlines in prop::collection::vec("[a-m /._-]{0,40}", 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut cmdlines = cmdlines;
        let target = pick.index(cmdlines.len());
        cmdlines[target] = format!("/usr/bin/node {}", cmdlines[target]);
        let table = table_from(&cmdlines);
        prop_assert_eq!(
            find_process_by_cmdline(&table, "node", LIMIT),
            LocateResult::Found(target as u32 + 100)
        );
    }

    #[test]
    fn multiple_matches_return_a_matching_pid(
        cmdlines in prop::collection::vec("[a-z /._-]{0,40}", 1..20),
        pattern in "[a-z]{1,2}",
    ) {
        let table = table_from(&cmdlines);
        match find_process_by_cmdline(&table, &pattern, LIMIT) {
            LocateResult::Found(pid) => {
                let cmd = &cmdlines[(pid - 100) as usize];
                prop_assert!(cmd.contains(pattern.as_str()));
            }
            LocateResult::NotFound => {
                prop_assert!(cmdlines.iter().all(|c| !c.contains(pattern.as_str())));
            }
        }
    }

    #[test]
    fn arguments_never_match(
        program in "[a-m /._-]{1,30}",
        args in prop::collection::vec("[a-z ./-]{0,20}", 0..5),
    ) {
        let mut argv = vec![program.as_str()];
        argv.extend(args.iter().map(String::as_str));
        argv.push("node");
        let table = StaticProcessTable::new().with_process(1, &argv, "");
        prop_assert_eq!(find_process_by_cmdline(&table, "node", LIMIT), LocateResult::NotFound);
    }

    #[test]
    fn well_formed_vmsize_round_trips(value in any::<u64>(), pad in 1usize..12) {
        let line = format!("VmSize:{}{} kB", " ".repeat(pad), value);
        prop_assert_eq!(parse_status(&line).info().virtual_size, value);
    }

    #[test]
    fn garbage_lines_never_clobber_fields(
        value in any::<u64>(),
        noise in prop::collection::vec("[ -~]{0,30}", 0..10),
    ) {
        let mut record = format!("VmRSS: {value} kB\n");
        for line in &noise {
            if !line.contains("VmRSS:") {
                record.push_str(line);
                record.push('\n');
            }
        }
        prop_assert_eq!(parse_status(&record).info().resident_set_size, value);
    }

    #[test]
    fn parsing_is_idempotent(record in "[ -~\n\t]{0,200}") {
        prop_assert_eq!(parse_status(&record), parse_status(&record));
    }
}

#[test]
fn missing_colon_is_ignored() {
    assert_eq!(parse_status("VmSize 1234 kB"), MemoryReading::NoFieldsParsed);
}
