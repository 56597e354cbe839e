//! Custom-value providers.
//!
//! Custom-sourced variables are filled from a caller-supplied table. The
//! [`CustomValueProvider`] trait is the seam for producing that table;
//! [`SalesContentPresets`] is the shipped implementation, selecting from
//! fixed sales-content catalogs with a rotation keyed to the company id
//! so the same company always gets the same picks.

use std::collections::BTreeMap;

use chrono::Utc;

use callsync_knowledge::Company;

use crate::template::{ContentTemplate, TemplateType};
use crate::value::{CustomValues, ListItem, Scalar, TemplateValue};

/// Produces the custom-value table for one template/company pair.
pub trait CustomValueProvider: Send + Sync {
    fn custom_values(&self, template: &ContentTemplate, company: &Company) -> CustomValues;
}

/// A fixed table works as a provider; handy for tests and for callers
/// that assemble their own values.
impl CustomValueProvider for CustomValues {
    fn custom_values(&self, _template: &ContentTemplate, _company: &Company) -> CustomValues {
        self.clone()
    }
}

const PRODUCT_BENEFITS: &[&str] = &[
    "Increased productivity by 34%",
    "Reduced meeting time by 45%",
    "Improved customer satisfaction by 27%",
    "Boosted team collaboration by 56%",
    "Decreased decision time by 38%",
    "Enhanced data accuracy by 42%",
    "Streamlined workflows by 30%",
    "Reduced operational costs by 25%",
];

const COMPETITIVE_ADVANTAGES: &[&str] = &[
    "Proprietary AI with 2x accuracy compared to competitors",
    "Seamless integration with 20+ platforms",
    "Industry-leading data security compliance",
    "24/7 dedicated customer support",
    "Customizable reporting and dashboards",
    "Mobile-optimized experience",
    "Rapid implementation (48 hours vs industry average of 2 weeks)",
    "No-code workflow customization",
];

const SUCCESS_METRICS: &[(&str, &str)] = &[
    ("ROI", "250% within first 6 months"),
    ("Time Saved", "15 hours per employee monthly"),
    ("Cost Reduction", "$145,000 annually"),
    ("Error Reduction", "86% fewer manual errors"),
    ("Adoption Rate", "92% user adoption"),
    ("Training Required", "< 2 hours per user"),
];

/// (company, contact, quote)
const CUSTOMER_REFERENCES: &[(&str, &str, &str)] = &[
    ("Acme Corp", "Jane Smith, CTO", "Game-changing solution for our team"),
    ("TechGiant", "Mark Johnson, VP of Sales", "Exceeded our expectations on every metric"),
    ("Global Finance", "Sarah Williams, Operations Director", "The ROI has been exceptional"),
    ("Retail Leaders", "David Chen, CIO", "Transformed our customer interactions"),
];

/// (name, before, after, impact)
const IMPROVEMENT_AREAS: &[(&str, &str, &str, &str)] = &[
    ("Meeting Efficiency", "3.5 hours daily", "1.5 hours daily", "57% reduction"),
    ("Customer Response Time", "24 hours", "4 hours", "83% improvement"),
    ("Sales Cycle Length", "45 days", "28 days", "38% shorter sales cycle"),
    ("Team Coordination", "5 coordination tools", "1 unified platform", "80% tool consolidation"),
    ("Data Accuracy", "76% accuracy", "98% accuracy", "22% improvement"),
];

/// (name, title, email)
const STAKEHOLDERS: &[(&str, &str, &str)] = &[
    ("Maria Rodriguez", "Chief Revenue Officer", "maria@company.com"),
    ("Raj Patel", "VP of Customer Success", "raj@company.com"),
    ("Emma Johnson", "Director of Operations", "emma@company.com"),
    ("Thomas Chen", "IT Security Lead", "thomas@company.com"),
    ("Aisha Washington", "Implementation Manager", "aisha@company.com"),
];

/// (factor, mitigation)
const RISK_FACTORS: &[(&str, &str)] = &[
    ("Implementation Timeline", "Phase-based approach with weekly milestones"),
    ("User Adoption", "Comprehensive training program with champions network"),
    ("Data Migration", "Test migrations with verification protocols"),
    ("Integration Complexity", "API-first approach with pre-implementation testing"),
    ("Budget Overrun", "Fixed-price implementation with clear scope definitions"),
];

const IMPLEMENTATION_PHASES: &[&str] = &[
    "Phase 1: Discovery and Design (2 weeks)",
    "Phase 2: Core Implementation (4 weeks)",
    "Phase 3: Integration (3 weeks)",
    "Phase 4: Testing and Validation (2 weeks)",
    "Phase 5: Training and Rollout (3 weeks)",
];

const KEY_MILESTONES: &[&str] = &[
    "Project kickoff: Week 1",
    "Solution design approval: Week 2",
    "Core functionality available: Week 6",
    "User acceptance testing: Week 10",
    "Production deployment: Week 14",
];

/// Deterministic sales-content presets.
///
/// Each value that the original demo sampled at random is instead taken
/// from a rotation of the catalog, with the rotation start derived from
/// the company id and the variable name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesContentPresets;

impl SalesContentPresets {
    pub fn new() -> Self {
        Self
    }
}

/// FNV-1a; a stable hash so rotations never shift across builds.
fn stable_hash(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

fn rotation<'a, T>(items: &'a [T], company_id: &str, key: &str, count: usize) -> Vec<&'a T> {
    let start = (stable_hash(company_id) ^ stable_hash(key)) as usize % items.len();
    items.iter().cycle().skip(start).take(count.min(items.len())).collect()
}

fn texts(items: &[&str], company_id: &str, key: &str, count: usize) -> TemplateValue {
    TemplateValue::texts(rotation(items, company_id, key, count).into_iter().copied())
}

fn row(pairs: &[(&str, &str)]) -> ListItem {
    ListItem::Map(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Scalar::Text((*v).to_string())))
            .collect::<BTreeMap<_, _>>(),
    )
}

impl CustomValueProvider for SalesContentPresets {
    fn custom_values(&self, template: &ContentTemplate, company: &Company) -> CustomValues {
        let id = company.id.as_str();
        let mut values = CustomValues::new();
        values.insert(
            "generatedDate",
            TemplateValue::text(Utc::now().format("%B %-d, %Y").to_string()),
        );

        match template.template_type {
            TemplateType::Proposal => {
                values.insert(
                    "executiveSummary",
                    TemplateValue::text(
                        "This proposal outlines our recommended solution based on our \
                         understanding of your requirements and challenges.",
                    ),
                );
                values.insert(
                    "proposedSolution",
                    TemplateValue::text(
                        "Our comprehensive platform provides end-to-end automation and \
                         intelligence for your team's needs.",
                    ),
                );
                values.insert("challengesSolved", texts(PRODUCT_BENEFITS, id, "challengesSolved", 3));
                values.insert("outcomes", texts(PRODUCT_BENEFITS, id, "outcomes", 3));
                values.insert("keyBenefits", texts(PRODUCT_BENEFITS, id, "keyBenefits", 4));
                values.insert(
                    "competitiveAdvantages",
                    texts(COMPETITIVE_ADVANTAGES, id, "competitiveAdvantages", 3),
                );
                values.insert(
                    "customerReferences",
                    TemplateValue::List(
                        rotation(CUSTOMER_REFERENCES, id, "customerReferences", 3)
                            .into_iter()
                            .map(|&(name, contact, quote)| {
                                row(&[("company", name), ("contact", contact), ("quote", quote)])
                            })
                            .collect(),
                    ),
                );
                values.insert(
                    "investmentSummary",
                    TemplateValue::text(
                        "$25,000 setup and $48,000 annual subscription, with 250% ROI expected \
                         within 6 months",
                    ),
                );
                values.insert(
                    "implementationTimeline",
                    TemplateValue::text("8 weeks from contract signature"),
                );
                values.insert(
                    "nextSteps",
                    TemplateValue::text(
                        "Schedule a technical workshop to define implementation details",
                    ),
                );
            }
            TemplateType::RoiAnalysis => {
                values.insert(
                    "executiveSummary",
                    TemplateValue::text(
                        "This analysis outlines the expected return on investment based on \
                         industry benchmarks and your specific usage patterns.",
                    ),
                );
                values.insert(
                    "initialInvestment",
                    TemplateValue::text("$73,000 (implementation + first year subscription)"),
                );
                values.insert(
                    "financialMetrics",
                    TemplateValue::List(
                        rotation(IMPROVEMENT_AREAS, id, "financialMetrics", 3)
                            .into_iter()
                            .map(|&(name, before, after, impact)| {
                                row(&[
                                    ("name", name),
                                    ("before", before),
                                    ("after", after),
                                    ("impact", impact),
                                ])
                            })
                            .collect(),
                    ),
                );
                values.insert(
                    "quantitativeGains",
                    TemplateValue::texts([
                        "Year 1: $98,000 estimated savings",
                        "Year 2: $182,000 estimated savings",
                        "Year 3: $215,000 estimated savings",
                    ]),
                );
                values.insert(
                    "qualitativeGains",
                    TemplateValue::texts([
                        "Improved employee satisfaction",
                        "Enhanced customer experience",
                        "Better market positioning",
                        "Increased data-driven decision making",
                    ]),
                );
                values.insert(
                    "expectedRoi",
                    TemplateValue::text(
                        "Expected ROI of 250% over 3 years, with break-even within 8.9 months",
                    ),
                );
                values.insert(
                    "implementationTimeline",
                    TemplateValue::text("12 weeks implementation"),
                );
                values.insert(
                    "conclusionStatement",
                    TemplateValue::text(
                        "The combined quantitative and qualitative benefits provide a compelling \
                         case for implementation.",
                    ),
                );
            }
            TemplateType::Handoff => {
                values.insert(
                    "stakeholders",
                    TemplateValue::List(
                        rotation(STAKEHOLDERS, id, "stakeholders", 3)
                            .into_iter()
                            .map(|&(name, title, email)| {
                                row(&[("name", name), ("title", title), ("email", email)])
                            })
                            .collect(),
                    ),
                );
                values.insert(
                    "riskFactors",
                    TemplateValue::List(
                        rotation(RISK_FACTORS, id, "riskFactors", 3)
                            .into_iter()
                            .map(|&(factor, mitigation)| {
                                row(&[("factor", factor), ("mitigation", mitigation)])
                            })
                            .collect(),
                    ),
                );
                values.insert(
                    "solutionOverview",
                    TemplateValue::text(
                        "The client has purchased our core platform with premium support and \
                         the integration add-on.",
                    ),
                );
                values.insert(
                    "implementationPlan",
                    TemplateValue::text(
                        "A phased implementation approach designed to minimize disruption while \
                         quickly delivering value.",
                    ),
                );
            }
            TemplateType::ExecutiveSummary => {
                values.insert(
                    "businessContext",
                    TemplateValue::text(
                        "Based on our discovery sessions, we've identified key opportunities to \
                         improve operational efficiency.",
                    ),
                );
                values.insert(
                    "challengesAddressed",
                    texts(PRODUCT_BENEFITS, id, "challengesAddressed", 3),
                );
                values.insert(
                    "recommendedApproach",
                    TemplateValue::text(
                        "A phased implementation focused on quick wins followed by broader \
                         transformation.",
                    ),
                );
                values.insert(
                    "strategicValue",
                    TemplateValue::text(
                        "This solution aligns with your stated objectives of improving customer \
                         experiences and operational efficiency.",
                    ),
                );
                values.insert(
                    "keyMetrics",
                    TemplateValue::texts(
                        rotation(SUCCESS_METRICS, id, "keyMetrics", 3)
                            .into_iter()
                            .map(|&(metric, value)| format!("{metric}: {value}")),
                    ),
                );
                values.insert(
                    "investmentSummary",
                    TemplateValue::text("$73,000 total first-year cost with expected 250% ROI"),
                );
                values.insert(
                    "conclusionStatement",
                    TemplateValue::text(
                        "This initiative represents a strategic opportunity to address current \
                         challenges while positioning for future growth.",
                    ),
                );
            }
            TemplateType::ImplementationPlan => {
                values.insert(
                    "approachOverview",
                    TemplateValue::text(
                        "A phased implementation approach designed to minimize disruption while \
                         quickly delivering value.",
                    ),
                );
                values.insert("phases", TemplateValue::texts(IMPLEMENTATION_PHASES.iter().copied()));
                values.insert(
                    "keyMilestones",
                    TemplateValue::texts(KEY_MILESTONES.iter().copied()),
                );
                values.insert(
                    "resourceRequirements",
                    TemplateValue::text(
                        "2-3 hours weekly from key stakeholders during implementation",
                    ),
                );
                values.insert(
                    "keyStakeholders",
                    TemplateValue::List(
                        rotation(STAKEHOLDERS, id, "keyStakeholders", 3)
                            .into_iter()
                            .map(|&(name, title, email)| {
                                row(&[("name", name), ("title", title), ("email", email)])
                            })
                            .collect(),
                    ),
                );
                values.insert(
                    "riskManagement",
                    TemplateValue::List(
                        rotation(RISK_FACTORS, id, "riskManagement", 3)
                            .into_iter()
                            .map(|&(factor, mitigation)| {
                                row(&[("factor", factor), ("mitigation", mitigation)])
                            })
                            .collect(),
                    ),
                );
                values.insert(
                    "successCriteria",
                    TemplateValue::text(
                        "Successful implementation will be measured by 100% feature deployment, \
                         85%+ user adoption within 30 days, and customer satisfaction scores of \
                         4.5/5 or higher.",
                    ),
                );
            }
        }

        values
    }
}
