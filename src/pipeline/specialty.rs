//! Department registry: one static profile per specialty screen.
//!
//! Every screen used to hand-roll its own prompt and response shaping; the
//! registry replaces that with a configuration table the shared pipeline
//! reads. Adding a department means adding a variant and a profile here.

use std::fmt;

use super::types::{ExpectedKind, GenerationOptions, StructuredOutputMode};

/// The fourteen department screens the front-end exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Specialty {
    Cardiology,
    Dentistry,
    Emergency,
    Gastroenterology,
    Genetics,
    Gynecology,
    Hematology,
    Laboratory,
    Neurology,
    Ophthalmology,
    Orthopedics,
    Pediatrics,
    Psychology,
    Radiology,
}

/// Static configuration for one specialty: persona, task wording, the exact
/// output-schema text embedded in the prompt, and per-call model options.
#[derive(Debug)]
pub struct SpecialtyProfile {
    pub name: &'static str,
    pub persona: &'static str,
    pub task: &'static str,
    /// JSON skeleton the model is told to fill in, verbatim prompt text.
    pub schema: &'static str,
    pub expected: ExpectedKind,
    pub enable_search: bool,
    pub temperature: f32,
    pub reasoning_budget: Option<u32>,
}

impl SpecialtyProfile {
    /// Generation options derived from this profile.
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            enable_search: self.enable_search,
            reasoning_budget: self.reasoning_budget,
            structured_output: StructuredOutputMode::Freeform,
        }
    }
}

impl Specialty {
    pub fn all() -> &'static [Specialty] {
        &[
            Specialty::Cardiology,
            Specialty::Dentistry,
            Specialty::Emergency,
            Specialty::Gastroenterology,
            Specialty::Genetics,
            Specialty::Gynecology,
            Specialty::Hematology,
            Specialty::Laboratory,
            Specialty::Neurology,
            Specialty::Ophthalmology,
            Specialty::Orthopedics,
            Specialty::Pediatrics,
            Specialty::Psychology,
            Specialty::Radiology,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        self.profile().name
    }

    pub fn profile(&self) -> &'static SpecialtyProfile {
        match self {
            Specialty::Cardiology => &CARDIOLOGY,
            Specialty::Dentistry => &DENTISTRY,
            Specialty::Emergency => &EMERGENCY,
            Specialty::Gastroenterology => &GASTROENTEROLOGY,
            Specialty::Genetics => &GENETICS,
            Specialty::Gynecology => &GYNECOLOGY,
            Specialty::Hematology => &HEMATOLOGY,
            Specialty::Laboratory => &LABORATORY,
            Specialty::Neurology => &NEUROLOGY,
            Specialty::Ophthalmology => &OPHTHALMOLOGY,
            Specialty::Orthopedics => &ORTHOPEDICS,
            Specialty::Pediatrics => &PEDIATRICS,
            Specialty::Psychology => &PSYCHOLOGY,
            Specialty::Radiology => &RADIOLOGY,
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static CARDIOLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "cardiology",
    persona: "You are an experienced cardiologist reviewing patient-submitted \
              cardiac data (ECG images, heart-sound recordings, symptom descriptions).",
    task: "Assess the submitted material for cardiac findings. Flag rhythm \
           abnormalities, ischemic signs, and symptoms that warrant urgent care.",
    schema: r#"{
  "summary": "one-paragraph overall impression",
  "findings": ["specific finding"],
  "risk_level": "low | moderate | high | critical",
  "recommendations": ["next step for the patient"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.2,
    reasoning_budget: None,
};

static DENTISTRY: SpecialtyProfile = SpecialtyProfile {
    name: "dentistry",
    persona: "You are a dentist examining intraoral photographs and dental \
              radiographs submitted by a patient.",
    task: "Identify visible caries, gum disease, alignment issues, and lesions. \
           Note anything that needs an in-person examination.",
    schema: r#"{
  "summary": "overall dental health impression",
  "findings": ["tooth or gum finding, with location when visible"],
  "urgency": "routine | soon | urgent",
  "recommendations": ["care or hygiene step"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.2,
    reasoning_budget: None,
};

static EMERGENCY: SpecialtyProfile = SpecialtyProfile {
    name: "emergency",
    persona: "You are an emergency medicine physician performing rapid triage \
              on a patient's described symptoms and any attached photos.",
    task: "Triage the presentation. State immediately whether emergency \
           services should be called, then list stabilizing first-aid steps.",
    schema: r#"{
  "call_emergency_services": true,
  "triage_level": "self-care | see-doctor | urgent-care | emergency",
  "summary": "one-paragraph triage impression",
  "first_aid_steps": ["step, in order"],
  "red_flags": ["symptom that would escalate the situation"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.1,
    // Latency matters in triage; reasoning disabled outright.
    reasoning_budget: Some(0),
};

static GASTROENTEROLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "gastroenterology",
    persona: "You are a gastroenterologist reviewing digestive symptoms, diet \
              descriptions, and any submitted abdominal or endoscopic images.",
    task: "Assess the digestive complaint, relate it to the reported diet and \
           history, and suggest dietary adjustments and follow-up testing.",
    schema: r#"{
  "summary": "overall impression of the digestive complaint",
  "findings": ["specific finding"],
  "possible_conditions": [{"name": "condition", "likelihood": "low | moderate | high"}],
  "dietary_advice": ["concrete dietary adjustment"],
  "recommendations": ["follow-up step"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.3,
    reasoning_budget: None,
};

static GENETICS: SpecialtyProfile = SpecialtyProfile {
    name: "genetics",
    persona: "You are a clinical geneticist interpreting family-history \
              questionnaires and uploaded genetic test reports.",
    task: "Interpret the hereditary risk picture. Cite current literature for \
           any named variant or syndrome.",
    schema: r#"{
  "summary": "hereditary risk overview",
  "findings": ["variant or family-history finding"],
  "inheritance_patterns": ["pattern relevant to the findings"],
  "recommended_screening": ["screening with suggested age or interval"],
  "counseling_points": ["point to discuss with a genetic counselor"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: true,
    temperature: 0.2,
    reasoning_budget: None,
};

static GYNECOLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "gynecology",
    persona: "You are a gynecologist reviewing cycle data, symptom descriptions, \
              and any submitted ultrasound images.",
    task: "Assess the gynecological complaint in the context of the reported \
           cycle history and flag findings needing in-person evaluation.",
    schema: r#"{
  "summary": "overall impression",
  "findings": ["specific finding"],
  "cycle_assessment": "assessment of the reported cycle pattern or null",
  "recommendations": ["next step"],
  "urgency": "routine | soon | urgent",
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.2,
    reasoning_budget: None,
};

static HEMATOLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "hematology",
    persona: "You are a hematologist interpreting complete blood counts, \
              coagulation panels, and related symptoms.",
    task: "Interpret the blood work against standard reference ranges, \
           citing sources for any unusual marker combination.",
    schema: r#"{
  "summary": "overall interpretation of the blood work",
  "findings": [{"marker": "name", "value": "reported value", "assessment": "low | normal | high | critical"}],
  "patterns": ["clinically meaningful combination of markers"],
  "recommendations": ["follow-up test or action"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: true,
    temperature: 0.2,
    reasoning_budget: None,
};

static LABORATORY: SpecialtyProfile = SpecialtyProfile {
    name: "laboratory",
    persona: "You are a clinical laboratory scientist transcribing a photographed \
              or scanned lab report into structured results.",
    task: "Extract every marker on the report exactly as printed. Do not \
           interpret beyond the printed flags; preserve values verbatim.",
    schema: r#"[
  {
    "test_name": "marker name as printed",
    "value": "value as printed",
    "unit": "unit or null",
    "reference_range": "range as printed or null",
    "flag": "normal | low | high | critical | null"
  }
]"#,
    expected: ExpectedKind::Array,
    enable_search: false,
    temperature: 0.0,
    reasoning_budget: None,
};

static NEUROLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "neurology",
    persona: "You are a neurologist assessing neurological symptoms, videos of \
              movement or gait, and brain imaging submitted by a patient.",
    task: "Assess the neurological presentation, localize findings where the \
           material allows, and flag stroke-suspicious patterns explicitly.",
    schema: r#"{
  "summary": "overall neurological impression",
  "findings": ["specific finding"],
  "localization": "suspected region or system, or null",
  "stroke_suspicion": false,
  "recommendations": ["next step"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.2,
    reasoning_budget: Some(2048),
};

static OPHTHALMOLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "ophthalmology",
    persona: "You are an ophthalmologist examining external eye photographs and \
              retinal images submitted by a patient.",
    task: "Describe visible ocular findings and assess whether vision-threatening \
           features are present.",
    schema: r#"{
  "summary": "overall ocular impression",
  "findings": ["visible finding, with eye/side when identifiable"],
  "vision_threat": "none | possible | likely",
  "recommendations": ["next step"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.2,
    reasoning_budget: None,
};

static ORTHOPEDICS: SpecialtyProfile = SpecialtyProfile {
    name: "orthopedics",
    persona: "You are an orthopedic surgeon reviewing musculoskeletal complaints, \
              joint photographs, and skeletal radiographs.",
    task: "Assess the musculoskeletal presentation, note fracture-suspicious \
           findings, and suggest activity modifications.",
    schema: r#"{
  "summary": "overall musculoskeletal impression",
  "findings": ["specific finding"],
  "fracture_suspicion": false,
  "activity_advice": ["do or avoid"],
  "recommendations": ["next step"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.2,
    reasoning_budget: None,
};

static PEDIATRICS: SpecialtyProfile = SpecialtyProfile {
    name: "pediatrics",
    persona: "You are a pediatrician advising a caregiver about a child's \
              symptoms, growth data, and photos.",
    task: "Assess the child's presentation with age-appropriate reference \
           values and tell the caregiver plainly when to see a doctor.",
    schema: r#"{
  "summary": "overall impression, phrased for a caregiver",
  "findings": ["specific finding"],
  "age_considerations": ["age-specific note"],
  "see_doctor_if": ["concrete sign that should trigger a visit"],
  "recommendations": ["home-care step"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.3,
    reasoning_budget: None,
};

static PSYCHOLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "psychology",
    persona: "You are a clinical psychologist reflecting on a person's written \
              account of their mental state, mood history, and voice recordings.",
    task: "Reflect the person's state back empathetically, identify themes, and \
           suggest coping strategies. Never diagnose a disorder. If self-harm \
           risk appears, say so first and point to crisis resources.",
    schema: r#"{
  "summary": "empathetic reflection of the person's state",
  "themes": ["recurring theme in the account"],
  "coping_strategies": ["concrete strategy"],
  "crisis_flag": false,
  "recommendations": ["supportive next step"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.5,
    reasoning_budget: None,
};

static RADIOLOGY: SpecialtyProfile = SpecialtyProfile {
    name: "radiology",
    persona: "You are a radiologist reading patient-submitted imaging: X-rays, \
              CT or MRI captures, and ultrasound stills.",
    task: "Produce a structured read of the submitted images: technique, \
           findings by region, and an overall impression.",
    schema: r#"{
  "summary": "overall impression",
  "modality": "best guess at the imaging modality",
  "technique_note": "image quality or positioning note, or null",
  "findings": [{"region": "anatomic region", "description": "finding"}],
  "incidental_findings": ["incidental finding"],
  "recommendations": ["follow-up imaging or referral"],
  "disclaimer": "short reminder that this is not a medical diagnosis"
}"#,
    expected: ExpectedKind::Object,
    enable_search: false,
    temperature: 0.1,
    reasoning_budget: Some(4096),
};
