// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subfinder Source Catalog
 * Static reference data describing the upstream enumeration sources
 *
 * © 2026 Bountyy Oy
 */

use crate::types::SourceCatalogEntry;

/// The upstream sources subfinder can query, with key requirements and a
/// coarse category. Informs UI and configuration choices only; unknown
/// names in a scan config are still passed through to the tool.
pub fn available_sources() -> &'static [SourceCatalogEntry] {
    SOURCES
}

static SOURCES: &[SourceCatalogEntry] = &[
    SourceCatalogEntry { name: "alienvault", description: "AlienVault OTX", requires_key: true, category: "Threat Intelligence" },
    SourceCatalogEntry { name: "anubis", description: "Anubis", requires_key: false, category: "Certificate Transparency" },
    SourceCatalogEntry { name: "bevigil", description: "BeVigil", requires_key: true, category: "Mobile App Intelligence" },
    SourceCatalogEntry { name: "binaryedge", description: "BinaryEdge", requires_key: true, category: "Internet Scanning" },
    SourceCatalogEntry { name: "bufferover", description: "BufferOver", requires_key: false, category: "DNS" },
    SourceCatalogEntry { name: "c99", description: "C99.nl", requires_key: true, category: "Subdomain Finder" },
    SourceCatalogEntry { name: "censys", description: "Censys", requires_key: true, category: "Internet Scanning" },
    SourceCatalogEntry { name: "certspotter", description: "CertSpotter", requires_key: false, category: "Certificate Transparency" },
    SourceCatalogEntry { name: "chaos", description: "Chaos", requires_key: true, category: "ProjectDiscovery" },
    SourceCatalogEntry { name: "chinaz", description: "ChinaZ", requires_key: false, category: "DNS" },
    SourceCatalogEntry { name: "crtsh", description: "crt.sh", requires_key: false, category: "Certificate Transparency" },
    SourceCatalogEntry { name: "dnsdb", description: "Farsight DNSDB", requires_key: true, category: "DNS Intelligence" },
    SourceCatalogEntry { name: "dnsdumpster", description: "DNSDumpster", requires_key: false, category: "DNS" },
    SourceCatalogEntry { name: "dnsrepo", description: "DNS Repo", requires_key: false, category: "DNS" },
    SourceCatalogEntry { name: "fofa", description: "FOFA", requires_key: true, category: "Internet Scanning" },
    SourceCatalogEntry { name: "fullhunt", description: "FullHunt", requires_key: true, category: "Attack Surface" },
    SourceCatalogEntry { name: "github", description: "GitHub", requires_key: true, category: "Code Repository" },
    SourceCatalogEntry { name: "hackertarget", description: "HackerTarget", requires_key: false, category: "Security Tools" },
    SourceCatalogEntry { name: "hunter", description: "Hunter.io", requires_key: true, category: "Email Finding" },
    SourceCatalogEntry { name: "intelx", description: "Intelligence X", requires_key: true, category: "Search Engine" },
    SourceCatalogEntry { name: "passivetotal", description: "PassiveTotal", requires_key: true, category: "Threat Intelligence" },
    SourceCatalogEntry { name: "quake", description: "Quake", requires_key: true, category: "Internet Scanning" },
    SourceCatalogEntry { name: "rapiddns", description: "RapidDNS", requires_key: false, category: "DNS" },
    SourceCatalogEntry { name: "reconcloud", description: "ReconCloud", requires_key: false, category: "Reconnaissance" },
    SourceCatalogEntry { name: "riddler", description: "Riddler", requires_key: false, category: "DNS" },
    SourceCatalogEntry { name: "robtex", description: "Robtex", requires_key: false, category: "DNS" },
    SourceCatalogEntry { name: "securitytrails", description: "SecurityTrails", requires_key: true, category: "DNS Intelligence" },
    SourceCatalogEntry { name: "shodan", description: "Shodan", requires_key: true, category: "Internet Scanning" },
    SourceCatalogEntry { name: "spyse", description: "Spyse", requires_key: true, category: "Internet Intelligence" },
    SourceCatalogEntry { name: "sublist3r", description: "Sublist3r", requires_key: false, category: "Subdomain Enumeration" },
    SourceCatalogEntry { name: "threatbook", description: "ThreatBook", requires_key: true, category: "Threat Intelligence" },
    SourceCatalogEntry { name: "threatcrowd", description: "ThreatCrowd", requires_key: false, category: "Threat Intelligence" },
    SourceCatalogEntry { name: "threatminer", description: "ThreatMiner", requires_key: false, category: "Threat Intelligence" },
    SourceCatalogEntry { name: "virustotal", description: "VirusTotal", requires_key: true, category: "Threat Intelligence" },
    SourceCatalogEntry { name: "waybackarchive", description: "Wayback Machine", requires_key: false, category: "Web Archive" },
    SourceCatalogEntry { name: "whoisxmlapi", description: "WhoisXML API", requires_key: true, category: "WHOIS/DNS" },
    SourceCatalogEntry { name: "zoomeye", description: "ZoomEye", requires_key: true, category: "Internet Scanning" },
];
