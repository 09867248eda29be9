//! Records of the dynamic (behavioral) triage report.

use crate::json::record;

use super::network::NetworkReport;

record! {
    /// The report of a single behavioral task.
    pub struct TriageReport {
        version: String = "version",
        sample: TargetDesc = "sample",
        task: TargetDesc = "task",
        errors: Vec<ReportTaskFailure> = "errors",
        analysis: ReportAnalysisInfo = "analysis",
        processes: Vec<Process> = "processes",
        signatures: Vec<Signature> = "signatures",
        network: NetworkReport = "network",
        dumped: Vec<Dump> = "dumped",
        extracted: Vec<Extract> = "extracted",
    }
}

impl TriageReport {
    /// Identifier of the task this report belongs to.
    pub fn task_id(&self) -> &str {
        &self.task.id
    }

    /// Processes that were part of the original submission rather than
    /// spawned during execution.
    pub fn original_processes(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter().filter(|p| p.orig)
    }
}

record! {
    /// Description of an analysis target (a sample or one of its tasks).
    pub struct TargetDesc {
        id: String = "id",
        score: i64 = "score",
        submitted: String = "submitted",
        completed: String = "completed",
        target: String = "target",
        pick: String = "pick",
        kind: String = "type",
        size: i64 = "size",
        md5: String = "md5",
        sha1: String = "sha1",
        sha256: String = "sha256",
        sha512: String = "sha512",
        ssdeep: String = "ssdeep",
        filetype: String = "filetype",
        static_tags: Vec<String> = "static_tags",
        family: Vec<String> = "family",
    }
}

record! {
    pub struct ReportTaskFailure {
        task: String = "task",
        backend: String = "backend",
        reason: String = "reason",
    }
}

record! {
    pub struct ReportAnalysisInfo {
        score: i64 = "score",
        family: Vec<String> = "family",
        tags: Vec<String> = "tags",
        ttp: Vec<String> = "ttp",
        features: Vec<String> = "features",
        submitted: String = "submitted",
        reported: String = "reported",
        max_time_network: i64 = "max_time_network",
        max_time_kernel: i64 = "max_time_kernel",
        backend: String = "backend",
        resource: String = "resource",
        resource_tags: Vec<String> = "resource_tags",
        platform: String = "platform",
    }
}

record! {
    /// A process observed during execution.
    ///
    /// `started` and `terminated` are offsets in milliseconds from the start
    /// of the analysis.
    pub struct Process {
        procid: i64 = "procid",
        procid_parent: i64 = "procid_parent",
        pid: i64 = "pid",
        ppid: i64 = "ppid",
        cmd: String = "cmd",
        image: String = "image",
        orig: bool = "orig",
        system: bool = "-",
        started: i64 = "started",
        terminated: i64 = "terminated",
    }
}

record! {
    /// A behavioral signature that fired.
    pub struct Signature {
        label: String = "label",
        name: String = "name",
        score: i64 = "score",
        ttp: Vec<String> = "ttp",
        tags: Vec<String> = "tags",
        indicators: Vec<Indicator> = "indicators",
        yara_rule: String = "yara_rule",
        description: String = "desc",
        url: String = "url",
    }
}

record! {
    /// Evidence backing a signature.
    pub struct Indicator {
        ioc: String = "ioc",
        description: String = "description",
        at: i64 = "at",
        source_pid: i64 = "pid",
        source_procid: i64 = "procid",
        target_pid: i64 = "pid_target",
        target_procid: i64 = "procid_target",
        flow: i64 = "flow",
        dump_file: String = "dump_file",
        resource: String = "resource",
        yara_rule: String = "yara_rule",
    }
}

record! {
    /// A memory region or file dumped during execution.
    pub struct Dump {
        at: i64 = "at",
        pid: i64 = "pid",
        procid: i64 = "procid",
        path: String = "path",
        name: String = "name",
        kind: String = "kind",
        addr: i64 = "addr",
        length: i64 = "length",
    }
}

record! {
    /// Configuration, ransom note or dropper details extracted from a dump.
    pub struct Extract {
        dumped_file: String = "dumped_file",
        resource: String = "resource",
        config: Config = "config",
        path: String = "path",
        ransom_note: Ransom = "ransom_note",
        dropper: Dropper = "dropper",
    }
}

record! {
    /// Malware configuration recovered by a family-specific extractor.
    pub struct Config {
        family: String = "family",
        tags: Vec<String> = "tags",
        rule: String = "rule",
        c2: Vec<String> = "c2",
        decoy: Vec<String> = "decoy",
        version: String = "version",
        botnet: String = "botnet",
        campaign: String = "campaign",
        mutex: Vec<String> = "mutex",
        dns: Vec<String> = "dns",
        keys: Vec<ConfigKey> = "keys",
        webinject: Vec<String> = "webinject",
        command_lines: Vec<String> = "command_lines",
        listen_addr: String = "listen_addr",
        listen_port: i64 = "listen_port",
        listen_for: Vec<String> = "listen_for",
        shellcode: Vec<String> = "shellcode",
        extracted_pe: Vec<String> = "extracted_pe",
        credentials: Vec<ConfigCredentials> = "credentials",
        attributes: std::collections::BTreeMap<String, String> = "attr",
    }
}

record! {
    pub struct ConfigKey {
        kind: String = "kind",
        key: String = "key",
        value: String = "value",
    }
}

record! {
    /// Credentials embedded in a configuration.
    pub struct ConfigCredentials {
        flow: i64 = "flow",
        protocol: String = "protocol",
        host: String = "host",
        port: i64 = "port",
        username: String = "username",
        password: String = "password",
    }
}

record! {
    pub struct Ransom {
        family: String = "family",
        target: String = "target",
        emails: Vec<String> = "emails",
        wallets: Vec<String> = "wallets",
        urls: Vec<String> = "urls",
        note: String = "note",
    }
}

record! {
    pub struct Dropper {
        family: String = "family",
        language: String = "language",
        source: String = "source",
        deobfuscated: String = "deobfuscated",
        urls: Vec<DropperUrl> = "urls",
    }
}

record! {
    pub struct DropperUrl {
        kind: String = "type",
        url: String = "url",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{MISSING_NUMBER, Record, parse};

    const REPORT: &str = r#"{
        "version": "0.2.3",
        "sample": {"id": "220121-rhmc9ahhgr", "score": 10, "target": "invoice.doc"},
        "task": {"id": "behavioral1", "pick": "main"},
        "analysis": {"score": 10, "family": ["emotet"], "tags": ["family:emotet", "banker"]},
        "processes": [
            {"procid": 1, "pid": 100, "cmd": "winword.exe", "orig": true, "-": false},
            {"procid": 2, "procid_parent": 1, "pid": 200, "cmd": "powershell.exe", "-": true}
        ],
        "signatures": [
            {"name": "Emotet", "score": 10, "indicators": [{"ioc": "1.2.3.4", "pid_target": 200}]},
            {"name": "Macro", "desc": "Office document with macros"}
        ],
        "extracted": [
            {"dumped_file": "memory/200-0x01.dmp",
             "config": {"family": "emotet", "c2": ["1.2.3.4:8080", "5.6.7.8:443"],
                        "keys": [{"kind": "ecc", "key": "pub", "value": "AAAA"}],
                        "attr": {"affiliate": "e4", "build": 12}}}
        ]
    }"#;

    #[test]
    fn full_report() {
        let report: TriageReport = parse(Some(REPORT)).unwrap();
        assert!(!report.is_empty());
        assert_eq!(report.task_id(), "behavioral1");
        assert_eq!(report.sample.score, 10);
        assert_eq!(report.sample.size, MISSING_NUMBER);
        assert_eq!(report.analysis.family, vec!["emotet"]);
        assert_eq!(report.processes[1].procid_parent, 1);
        assert!(report.processes[1].system);
        assert_eq!(report.original_processes().count(), 1);
        assert_eq!(report.signatures[0].indicators[0].target_pid, 200);
        assert_eq!(report.signatures[0].indicators[0].source_pid, MISSING_NUMBER);
        assert_eq!(report.signatures[1].description, "Office document with macros");
        assert!(report.errors.is_empty());
        assert!(report.network.is_empty());
    }

    #[test]
    fn extracted_config() {
        let report: TriageReport = parse(Some(REPORT)).unwrap();
        let extract = &report.extracted[0];
        assert_eq!(extract.config.c2.len(), 2);
        assert_eq!(extract.config.keys[0].kind, "ecc");
        assert_eq!(extract.config.attributes["affiliate"], "e4");
        assert_eq!(extract.config.attributes["build"], "12");
        assert_eq!(extract.config.listen_port, MISSING_NUMBER);
        assert!(extract.ransom_note.is_empty());
        assert!(extract.dropper.is_empty());
        assert!(extract.dropper.urls.is_empty());
    }
}
