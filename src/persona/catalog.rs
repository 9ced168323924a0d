//! The persona catalog
//!
//! Mirrors the directory served to every client: roughly 130 roles
//! spanning the C-suite, engineering, data, security, product,
//! go-to-market, and specialist tracks. Entries are immutable and loaded
//! once; the directory view only ever filters them.

/// One selectable persona
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaEntry {
    /// Stable identifier sent to the service
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// One-line description of the viewpoint
    pub description: &'static str,
    /// Display grouping (icon/color selection only)
    pub category: &'static str,
}

const fn entry(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: &'static str,
) -> PersonaEntry {
    PersonaEntry { id, title, description, category }
}

/// The full persona catalog, in display order
pub fn catalog() -> &'static [PersonaEntry] {
    CATALOG
}

/// Look up a persona by id
pub fn find(id: &str) -> Option<&'static PersonaEntry> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Human-readable form of a persona id for display.
///
/// Short ids (acronyms like "cto") are upper-cased; longer ids are split
/// on underscores and title-cased. An absent persona reads as "Standard".
pub fn format_persona(persona: Option<&str>) -> String {
    let persona = match persona {
        Some(p) if !p.is_empty() => p,
        _ => return "Standard".to_string(),
    };

    if persona.len() <= 3 {
        return persona.to_uppercase();
    }

    persona
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

static CATALOG: &[PersonaEntry] = &[
    // C-Suite
    entry("c_suite", "C-Suite Executive", "High-level ROI, capital allocation, and total business value focus.", "exec"),
    entry("ceo", "Chief Executive Officer", "Overall corporate strategy, market positioning, and growth.", "strategy"),
    entry("cto", "Chief Technology Officer", "Long-term technology vision and R&D investment strategy.", "tech"),
    entry("cfo", "Chief Financial Officer", "Financial modeling, margin analysis, and cost optimization.", "growth"),
    entry("ciso", "Chief Info Security Officer", "Enterprise risk, cyber threats, and security governance.", "sec"),
    entry("coo", "Chief Operating Officer", "Operational efficiency, supply chain, and process scaling.", "ops"),
    entry("cmo", "Chief Marketing Officer", "Brand equity, customer acquisition costs, and market share.", "marketing"),
    entry("cro", "Chief Revenue Officer", "Sales pipeline, revenue forecasting, and field operations.", "sales"),
    // Engineering Leadership
    entry("vp_eng", "VP of Engineering", "Engineering velocity, organizational structure, and tech debt.", "arch"),
    entry("dir_eng", "Director of Engineering", "Cross-team delivery, agile maturity, and system reliability.", "tech"),
    entry("head_arch", "Head of Architecture", "Enterprise architecture standards, macro-patterns.", "layers"),
    entry("eng_mgr", "Engineering Manager", "Sprint execution, team health, and tactical unblocking.", "users"),
    // Core Engineering
    entry("prin_swe", "Principal Software Eng", "Complex system design, deep technical problem solving.", "tech"),
    entry("staff_swe", "Staff Software Engineer", "Multi-service architecture and technical leadership.", "tech"),
    entry("sr_swe", "Senior Software Engineer", "Feature implementation, code review, and system optimization.", "cli"),
    entry("backend_dev", "Backend Developer", "API design, database interactions, and server logic.", "api"),
    entry("frontend_dev", "Frontend Developer", "Client-side architecture, state management, and UI logic.", "ui"),
    entry("fullstack_dev", "Fullstack Developer", "End-to-end feature delivery across the stack.", "code"),
    entry("mobile_dev", "Mobile Developer", "iOS/Android app performance and native integrations.", "mobile"),
    // Cloud & Infrastructure
    entry("cloud_arch", "Cloud Architect", "AWS/GCP/Azure topology, cost optimization, and multi-cloud.", "cloud"),
    entry("devops_eng", "DevOps Engineer", "CI/CD pipelines, containerization, and deployment automation.", "fast"),
    entry("sre", "Site Reliability Eng", "SLAs/SLOs, incident response, and infrastructure monitoring.", "ops"),
    entry("platform_eng", "Platform Engineer", "Internal developer portals and golden path tooling.", "infra"),
    entry("sys_admin", "Systems Administrator", "Local and internal network management and hardware.", "admin"),
    entry("network_eng", "Network Engineer", "Routing, switching, firewalls, and network latency.", "network"),
    entry("db_admin", "Database Administrator", "Query performance, backups, replication, and sharding.", "storage"),
    // Data & AI
    entry("vp_data", "VP of Data", "Data governance, warehouse strategy, and ML investment.", "data"),
    entry("data_sci", "Data Scientist", "Predictive modeling, statistical analysis, and ML training.", "tech"),
    entry("data_eng", "Data Engineer", "ETL pipelines, data lakes, and stream processing.", "database"),
    entry("ml_eng", "Machine Learning Eng", "Model deployment, MLOps, and inference optimization.", "fast"),
    entry("ai_researcher", "AI Researcher", "Transformer architectures, LLM fine-tuning, and R&D.", "tech"),
    entry("bi_analyst", "Business Intel Analyst", "Dashboards, reporting, and business metric extraction.", "chartbar"),
    entry("data_arch", "Data Architect", "Schema design, data modeling, and master data management.", "arch"),
    // Security & Compliance
    entry("sec_arch", "Security Architect", "Zero-trust design, identity access management, and crypto.", "auth"),
    entry("app_sec", "Application Security Eng", "SAST/DAST, vulnerability scanning, and secure coding.", "sec"),
    entry("sec_ops", "SecOps Analyst", "Threat hunting, SIEM monitoring, and incident triage.", "target"),
    entry("pen_tester", "Penetration Tester", "Red teaming, exploit development, and vulnerability assessment.", "fast"),
    entry("compliance_officer", "Compliance Officer", "SOC2, HIPAA, GDPR adherence and audit management.", "scale"),
    entry("privacy_eng", "Privacy Engineer", "Data anonymization, consent management, and PII tracing.", "lock"),
    // Product & Design
    entry("vp_product", "VP of Product", "Product portfolio strategy and market fit expansion.", "product"),
    entry("dir_product", "Director of Product", "Roadmap alignment, resource allocation across product lines.", "product"),
    entry("prod_mgr", "Product Manager", "User stories, sprint planning, and feature prioritization.", "users"),
    entry("tech_pm", "Technical Product Mgr", "API products, developer experience, and backend features.", "api"),
    entry("vp_design", "VP of Design", "Design systems, brand identity, and total user experience.", "design"),
    entry("ux_researcher", "UX Researcher", "User testing, empathy mapping, and behavioral analysis.", "search"),
    entry("ui_designer", "UI Designer", "Prototyping, visual hierarchy, and component design.", "layout"),
    entry("prod_designer", "Product Designer", "End-to-end user flows and interaction design.", "design"),
    // Quality & Testing
    entry("qa_mgr", "QA Manager", "Quality processes, test coverage metrics, and release gating.", "qa"),
    entry("sdet", "SDET", "Test automation frameworks and end-to-end integration tests.", "code"),
    entry("perf_eng", "Performance Engineer", "Load testing, profiling, and latency reduction.", "fast"),
    entry("qa_analyst", "QA Analyst", "Manual exploratory testing and bug reproduction.", "qa"),
    // Sales & Go-To-Market
    entry("vp_sales", "VP of Sales", "Territory planning, quota setting, and sales methodology.", "growth"),
    entry("sales_eng", "Sales Engineer / SE", "Technical proofs-of-concept, demos, and architecture validation.", "arch"),
    entry("sol_arch", "Solutions Architect", "Post-sales integration, reference architectures, and client tech.", "arch"),
    entry("ent_ae", "Enterprise Account Exec", "Complex deal cycles, stakeholder management, and negotiations.", "sales"),
    entry("sdr", "Sales Dev Rep", "Outbound prospecting, lead qualification, and pipeline generation.", "comms"),
    entry("rev_ops", "Revenue Operations", "CRM hygiene, sales tooling, and pipeline analytics.", "ops"),
    entry("partner_mgr", "Channel Partner Mgr", "Reseller enablement, strategic alliances, and integrations.", "global"),
    // Marketing
    entry("prod_mktg", "Product Marketing Mgr", "Positioning, messaging, competitive intel, and launch strategy.", "marketing"),
    entry("growth_mktg", "Growth Marketer", "A/B testing, conversion rate optimization, and paid acquisition.", "growth"),
    entry("content_mktg", "Content Strategist", "Technical blogs, whitepapers, and thought leadership.", "pen"),
    entry("dev_rel", "Developer Advocate", "Community building, OSS contributions, and developer tutorials.", "code"),
    entry("seo_mgr", "SEO Manager", "Organic search visibility, site hierarchy, and technical SEO.", "search"),
    entry("event_mgr", "Field Marketing Mgr", "Conferences, tradeshows, and regional pipeline generation.", "globe"),
    // Customer Success & Support
    entry("vp_cs", "VP of Customer Success", "Net Revenue Retention (NRR), churn mitigation, and account health.", "users"),
    entry("csm", "Customer Success Mgr", "Onboarding, quarterly business reviews, and adoption metrics.", "users"),
    entry("tech_supp_eng", "Tech Support Engineer", "Ticket escalation, log analysis, and deep troubleshooting.", "cli"),
    entry("supp_mgr", "Support Manager", "Time-to-resolution metrics, support tiers, and knowledge base.", "settings"),
    entry("implem_mgr", "Implementation Mgr", "Project timelines, client data migration, and go-live orchestration.", "pm"),
    // Finance & Legal
    entry("fin_analyst", "Financial Analyst", "Budget variant analysis, SaaS metrics (CAC, LTV), and OPEX.", "chartbar"),
    entry("controller", "Corporate Controller", "Accounting standards, payroll, and audit readiness.", "scale"),
    entry("gen_counsel", "General Counsel", "Corporate law, M&A due diligence, and risk management.", "legal"),
    entry("contracts_mgr", "Contracts Manager", "Vendor agreements, NDA review, and procurement terms.", "pen"),
    entry("ip_lawyer", "IP Attorney", "Patent filings, trademark protection, and open source licenses.", "lock"),
    // HR & Operations
    entry("vp_hr", "VP of Human Resources", "Talent strategy, comp bands, and organizational culture.", "users"),
    entry("tech_recruiter", "Technical Recruiter", "Sourcing engineering talent, pipeline velocity, and candidate tech screening.", "search"),
    entry("hrbp", "HR Business Partner", "Manager coaching, employee relations, and performance calibration.", "users"),
    entry("it_mgr", "IT Manager", "Endpoint management, SaaS provisioning, and internal helpdesk.", "admin"),
    entry("facil_mgr", "Facilities Manager", "Real estate footprint, office logistics, and physical security.", "core"),
    // Consulting & Professional Services
    entry("mgmt_consultant", "Management Consultant", "Digital transformation, org design, and strategic advisory.", "strategy"),
    entry("agile_coach", "Agile Coach", "Scrum/Kanban implementation, velocity tracking, and ceremonies.", "users"),
    entry("sol_consultant", "Solutions Consultant", "Custom implementations, SOW scoping, and billable delivery.", "pm"),
    entry("change_mgr", "Change Manager", "Stakeholder alignment, training rollouts, and adoption curves.", "settings"),
    entry("erp_consultant", "ERP Consultant", "SAP/Oracle implementations, financial workflows, and supply chain.", "database"),
    // Specialized Tech / Vertical
    entry("blockchain_eng", "Blockchain Engineer", "Smart contracts, consensus mechanisms, and Web3 architectures.", "network"),
    entry("iot_arch", "IoT Architect", "Edge computing, sensor telemetry, and low-latency protocols.", "hardware"),
    entry("robotics_eng", "Robotics Engineer", "Kinematics, computer vision, and autonomous navigation.", "hardware"),
    entry("quant_research", "Quantitative Researcher", "Algorithmic trading, complex math models, and high-frequency execution.", "tech"),
    entry("bioinfo", "Bioinformatician", "Genomic data pipelines, computational biology, and sequence analysis.", "data"),
    // Founders & Investors
    entry("founder", "Startup Founder", "Vision, fundraising, product-market fit, and survival.", "strategy"),
    entry("investor", "Venture Capitalist", "TAM analysis, competitive moats, and exit multiples.", "growth"),
    entry("auditor", "IT Auditor", "Access controls, change management logs, and compliance verification.", "scale"),
    entry("sys_integrator", "Systems Integrator", "Connecting legacy on-prem systems with cloud-native APIs.", "network"),
    entry("tech_writer", "Technical Writer", "API documentation, user manuals, and knowledge base architecture.", "pen"),
    entry("l1_support", "L1 Helpdesk Analyst", "Password resets, basic triage, and ticket routing.", "cli"),
    entry("l2_support", "L2 Support Technician", "Application configuration, basic log analysis, and escalation.", "settings"),
    entry("freelancer", "Independent Contractor", "Project-based delivery, self-management, and specialized skills.", "user"),
    entry("student", "Computer Science Student", "Learning fundamentals, algorithms, and exploring tech stacks.", "tech"),
    entry("external_auditor", "External Auditor", "Third-party assessment, financial review, and regulatory reporting.", "scale"),
    entry("scrum_master", "Scrum Master", "Facilitating sprint ceremonies, removing blockers.", "users"),
    entry("rel_eng", "Release Engineer", "Branching strategies, version control, release trains.", "code"),
    entry("data_steward", "Data Steward", "Data quality, metadata management, lifecycle.", "database"),
    entry("ai_ethicist", "AI Ethicist", "Bias mitigation, fairness, responsible AI deployment.", "scale"),
    entry("cloud_finops", "Cloud FinOps", "Unit economics of cloud spend, resource waste mapping.", "chartbar"),
    entry("soc_analyst", "SOC Analyst", "Log review, phishing analysis, level 1 incident response.", "sec"),
    entry("iam_eng", "IAM Engineer", "OAuth, SAML, RBAC, and directory services integration.", "lock"),
    entry("vuln_mgr", "Vulnerability Mgr", "Patch management, CVE scoring, remediation metrics.", "target"),
    entry("chief_data_off", "Chief Data Officer", "Data monetization, analytics center of excellence.", "data"),
    entry("chief_prod_off", "Chief Product Officer", "Product vision, multi-year feature parity strategy.", "product"),
    entry("hw_eng", "Hardware Engineer", "PCB design, ASIC layout, schematic capture.", "hardware"),
    entry("firmware_eng", "Firmware Engineer", "Microcontrollers, low-level C, RTOS operations.", "tech"),
    entry("sys_eng", "Systems Engineer", "V-model lifecycle, requirements traceability.", "layers"),
    entry("dr_mgr", "Disaster Recovery Mgr", "RTO/RPO mapping, failover testing, business continuity.", "ops"),
    entry("noc_analyst", "NOC Analyst", "Network alarms, bandwidth monitoring, ISP coordination.", "network"),
    entry("helpdesk_mgr", "Helpdesk Manager", "SLA enforcement, ITSM configuration, shift scheduling.", "settings"),
    entry("sys_prog", "Systems Programmer", "OS kernels, driver development, compiler tuning.", "cli"),
    entry("quant_dev", "Quant Developer", "Low-latency C++, market data parsers, order gateways.", "fast"),
    entry("game_dev", "Game Developer", "Graphics rendering, physics engines, frame rates.", "tech"),
    entry("xr_eng", "AR/VR Engineer", "Spatial computing, Unity/Unreal, headset integration.", "mobile"),
    entry("av_eng", "AV Engineer", "Self-driving models, LiDAR processing, sensor fusion.", "hardware"),
    entry("rpa_dev", "RPA Developer", "UiPath/BluePrism automation of repetitive tasks.", "fast"),
    entry("sales_ops", "Sales Operations", "Quota planning, territory mapping, compensation logic.", "chartbar"),
    entry("mktg_ops", "Marketing Operations", "Marketo/Hubspot routing, lead scoring, campaign analytics.", "settings"),
    entry("legal_ops", "Legal Operations", "Contract lifecycle management tools, e-discovery.", "legal"),
    entry("treasury", "Treasury Analyst", "Cash flow forecasting, FX hedging, banking relations.", "growth"),
    entry("procurement", "Procurement Mgr", "Vendor SLAs, RFP scoring, hardware supply chains.", "core"),
    entry("brand_mgr", "Brand Manager", "Visual identity, tone of voice, market research.", "marketing"),
    entry("pr_mgr", "Public Relations Mgr", "Press releases, media relations, crisis comms.", "comms"),
    entry("community_mgr", "Community Manager", "Forum moderation, Discord hosting, user advocacy.", "users"),
    entry("localization", "Localization Specialist", "i18n, l10n, translation workflows, cultural adaptation.", "globe"),
    entry("access_eng", "Accessibility Eng", "WCAG compliance, screen readers, keyboard navigation.", "ui"),
    entry("tech_trainer", "Technical Trainer", "Onboarding curricula, cert preps, LMS administration.", "pm"),
    entry("customer_educ", "Customer Educator", "Webinars, help center articles, video tutorials.", "video"),
    entry("partner_eng", "Partner Engineer", "API integrations for ISVs, joint solutions architecture.", "api"),
    entry("evangelist", "Tech Evangelist", "Keynotes, podcasts, high-level technology promotion.", "radio"),
    entry("sc_analyst", "Supply Chain Analyst", "Inventory turns, logistics tracking, supplier risk.", "core"),
    entry("chief_staff", "Chief of Staff", "Executive alignment, board prep, strategic initiatives.", "strategy"),
    entry("head_talent", "Head of Talent", "Employer branding, headcount planning, executive search.", "users"),
    entry("agile_pm", "Agile Project Mgr", "Burndown charts, risk registers, sprint coordination.", "pm"),
];

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
