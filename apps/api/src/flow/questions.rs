//! Scripted question catalogs, one per supported language.

use crate::typst::TemplateId;

/// Interview language. Unrecognized codes fall back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Odia,
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hi" => Language::Hindi,
            "or" => Language::Odia,
            _ => Language::English,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Odia => "or",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Odia => "Odia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
}

/// The ordered questions for one template and language, plus the closing line.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub questions: Vec<Question>,
    pub completion_message: &'static str,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.key == key)
    }
}

pub fn catalog(template: TemplateId, language: Language) -> Catalog {
    let prompts = match language {
        Language::English => &EN,
        Language::Hindi => &HI,
        Language::Odia => &OR,
    };

    let mut questions: Vec<Question> = KEYS
        .iter()
        .zip(prompts.iter())
        .map(|(&key, &prompt)| Question { key, prompt })
        .collect();

    if template.descriptor().takes_linkedin {
        questions.push(Question {
            key: "linkedin",
            prompt: linkedin_prompt(language),
        });
    }

    Catalog {
        questions,
        completion_message: completion_message(language),
    }
}

pub fn completion_message(language: Language) -> &'static str {
    match language {
        Language::English => "Great! Your resume is complete. You can now generate the PDF.",
        Language::Hindi => "बढ़िया! आपका बायोडाटा पूरा हो गया है। अब आप पीडीएफ उत्पन्न कर सकते हैं।",
        Language::Odia => "ଉତ୍ତମ! ଆପଣଙ୍କର ରିଜ୍ୟୁମ୍ ସମ୍ପୂର୍ଣ୍ଣ ହୋଇଛି | ଆପଣ ବର୍ତ୍ତମାନ PDF ସୃଷ୍ଟି କରିପାରିବେ |",
    }
}

fn linkedin_prompt(language: Language) -> &'static str {
    match language {
        Language::English => "What is your LinkedIn profile URL? (Optional, type \"skip\")",
        Language::Hindi => "आपकी लिंक्डइन प्रोफ़ाइल यूआरएल क्या है? (वैकल्पिक, \"skip\" टाइप करें)",
        Language::Odia => "ଆପଣଙ୍କର ଲିଙ୍କଡଇନ୍ ପ୍ରୋଫାଇଲ୍ URL କ’ଣ? (ବୈକଳ୍ପିକ, \"skip\" ଟାଇପ୍ କରନ୍ତୁ)",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog tables (index-aligned with KEYS)
// ────────────────────────────────────────────────────────────────────────────

const KEYS: [&str; 35] = [
    "name",
    "trade",
    "phone",
    "email",
    "location",
    "summary",
    "license",
    "technical_skills",
    "safety_certs",
    "exp1_title",
    "exp1_company",
    "exp1_location",
    "exp1_dates",
    "exp1_responsibilities",
    "exp2_title",
    "exp2_company",
    "exp2_location",
    "exp2_dates",
    "exp2_responsibilities",
    "cert1_name",
    "cert1_issuer",
    "cert1_date",
    "cert2_name",
    "cert2_issuer",
    "cert2_date",
    "edu1_degree",
    "edu1_institution",
    "edu1_location",
    "edu1_year",
    "edu2_degree",
    "edu2_institution",
    "edu2_location",
    "edu2_year",
    "safety_record",
    "achievements",
];

const EN: [&str; 35] = [
    "What is your full name?",
    "What is your trade or job title? (e.g., \"Plumber\", \"Driver\")",
    "What is your phone number?",
    "What is your email address?",
    "What is your current location? (e.g., \"Rourkela, Odisha\")",
    "Please provide a brief professional summary.",
    "What is your driving license number or trade certification?",
    "List your key technical skills, separated by commas.",
    "List any safety certifications you have (e.g., \"First Aid\"), separated by commas.",
    "What was your most recent job title?",
    "What was the company name?",
    "Where was this job located?",
    "What were the start and end dates? (e.g., \"Jan 2020 - Present\")",
    "List your main responsibilities, separated by commas.",
    "What was your previous job title? (Type \"skip\" if none)",
    "What was the company name?",
    "Where was this job located?",
    "What were the start and end dates?",
    "List your main responsibilities, separated by commas.",
    "What is the name of another certification or training? (Type \"skip\" to skip)",
    "Who issued this certification?",
    "When did you receive it?",
    "Any other certification? (Type \"skip\" to skip)",
    "Who issued this certification?",
    "When did you receive it?",
    "What is your highest qualification? (e.g., \"10th Pass\", \"ITI Fitter\")",
    "What is the name of your school or institution?",
    "Where was it located?",
    "What year did you complete it?",
    "Any other qualification? (Type \"skip\" to skip)",
    "What is the name of your school or institution?",
    "Where was it located?",
    "What year did you complete it?",
    "Describe your safety record (e.g., \"Accident-free for 5 years\")",
    "List any awards or achievements, separated by commas.",
];

const HI: [&str; 35] = [
    "आपका पूरा नाम क्या है?",
    "आपका पेशा या नौकरी का शीर्षक क्या है? (जैसे, \"प्लंबर\", \"ड्राइवर\")",
    "आपका फ़ोन नंबर क्या है?",
    "आपका ईमेल पता क्या है?",
    "आपका वर्तमान स्थान क्या है? (जैसे, \"राउरकेला, ओडिशा\")",
    "कृपया एक संक्षिप्त पेशेवर सारांश प्रदान करें।",
    "आपका ड्राइविंग लाइसेंस नंबर या ट्रेड सर्टिफिकेशन क्या है?",
    "अपने प्रमुख तकनीकी कौशल सूचीबद्ध करें, अल्पविराम से अलग करके।",
    "आपके पास कोई सुरक्षा प्रमाणपत्र सूचीबद्ध करें (जैसे, \"प्राथमिक उपचार\"), अल्पविराम से अलग करके।",
    "आपकी सबसे हाल की नौकरी का शीर्षक क्या था?",
    "कंपनी का नाम क्या था?",
    "यह नौकरी कहाँ स्थित थी?",
    "प्रारंभ और समाप्ति तिथियां क्या थीं? (जैसे, \"जनवरी 2020 - वर्तमान\")",
    "अपनी मुख्य जिम्मेदारियों को सूचीबद्ध करें, अल्पविराम से अलग करके।",
    "आपका पिछला नौकरी शीर्षक क्या था? (कोई नहीं होने पर \"skip\" टाइप करें)",
    "कंपनी का नाम क्या था?",
    "यह नौकरी कहाँ स्थित थी?",
    "प्रारंभ और समाप्ति तिथियां क्या थीं?",
    "अपनी मुख्य जिम्मेदारियों को सूचीबद्ध करें, अल्पविराम से अलग करके।",
    "किसी अन्य प्रमाणीकरण या प्रशिक्षण का नाम क्या है? (छोड़ने के लिए \"skip\" टाइप करें)",
    "यह प्रमाणीकरण किसने जारी किया?",
    "आपने इसे कब प्राप्त किया?",
    "कोई अन्य प्रमाणीकरण? (छोड़ने के लिए \"skip\" टाइप करें)",
    "यह प्रमाणीकरण किसने जारी किया?",
    "आपने इसे कब प्राप्त किया?",
    "आपकी उच्चतम योग्यता क्या है? (जैसे, \"10वीं पास\", \"आईटीआई फिटर\")",
    "आपके स्कूल या संस्थान का नाम क्या है?",
    "यह कहाँ स्थित था?",
    "आपने इसे किस वर्ष पूरा किया?",
    "कोई अन्य योग्यता? (छोड़ने के लिए \"skip\" टाइप करें)",
    "आपके स्कूल या संस्थान का नाम क्या है?",
    "यह कहाँ स्थित था?",
    "आपने इसे किस वर्ष पूरा किया?",
    "अपने सुरक्षा रिकॉर्ड का वर्णन करें (जैसे, \"5 वर्षों से दुर्घटना-मुक्त\")",
    "कोई पुरस्कार या उपलब्धियां सूचीबद्ध करें, अल्पविराम से अलग करके।",
];

const OR: [&str; 35] = [
    "ଆପଣଙ୍କର ପୂରା ନାମ କ’ଣ?",
    "ଆପଣଙ୍କର ବାଣିଜ୍ୟ ବା ଚାକିରି ଶୀର୍ଷକ କ’ଣ? (ଯେପରିକି, \"ପ୍ଲମ୍ବର\", \"ଡ୍ରାଇଭର\")",
    "ଆପଣଙ୍କର ଫୋନ୍ ନମ୍ବର କ’ଣ?",
    "ଆପଣଙ୍କର ଇମେଲ୍ ଠିକଣା କ’ଣ?",
    "ଆପଣଙ୍କର ବର୍ତ୍ତମାନର ଅବସ୍ଥାନ କ’ଣ? (ଯେପରିକି, \"ରାଉରକେଲା, ଓଡ଼ିଶା\")",
    "ଦୟାକରି ଏକ ସଂକ୍ଷିପ୍ତ ବୃତ୍ତିଗତ ସାରାଂଶ ପ୍ରଦାନ କରନ୍ତୁ।",
    "ଆପଣଙ୍କର ଡ୍ରାଇଭିଂ ଲାଇସେନ୍ସ ନମ୍ବର କିମ୍ବା ଟ୍ରେଡ୍ ସାର୍ଟିଫିକେସନ୍ କ’ଣ?",
    "ଆପଣଙ୍କର ମୁଖ୍ୟ ବୈଷୟିକ କୌଶଳଗୁଡ଼ିକୁ ତାଲିକାଭୁକ୍ତ କରନ୍ତୁ, କମା ଦ୍ୱାରା ପୃଥକ କରନ୍ତୁ।",
    "ଆପଣଙ୍କର ଥିବା ଯେକୌଣସି ସୁରକ୍ଷା ପ୍ରମାଣପତ୍ର ତାଲିକାଭୁକ୍ତ କରନ୍ତୁ (ଯେପରିକି, \"ପ୍ରାଥମିକ ଚିକିତ୍ସା\"), କମା ଦ୍ୱାରା ପୃଥକ କରନ୍ତୁ।",
    "ଆପଣଙ୍କର ସର୍ବଶେଷ ଚାକିରି ଶୀର୍ଷକ କ’ଣ ଥିଲା?",
    "କମ୍ପାନୀର ନାମ କ’ଣ ଥିଲା?",
    "ଏହି ଚାକିରି କେଉଁଠାରେ ଥିଲା?",
    "ଆରମ୍ଭ ଏବଂ ଶେଷ ତାରିଖ କ’ଣ ଥିଲା? (ଯେପରିକି, \"ଜାନୁଆରୀ 2020 - ବର୍ତ୍ତମାନ\")",
    "ଆପଣଙ୍କର ମୁଖ୍ୟ ଦାୟିତ୍ୱଗୁଡ଼ିକୁ ତାଲିକାଭୁକ୍ତ କରନ୍ତୁ, କମା ଦ୍ୱାରା ପୃଥକ କରନ୍ତୁ।",
    "ଆପଣଙ୍କର ପୂର୍ବ ଚାକିରି ଶୀର୍ଷକ କ’ଣ ଥିଲା? (ଯଦି କିଛି ନାହିଁ ତେବେ \"skip\" ଟାଇପ୍ କରନ୍ତୁ)",
    "କମ୍ପାନୀର ନାମ କ’ଣ ଥିଲା?",
    "ଏହି ଚାକିରି କେଉଁଠାରେ ଥିଲା?",
    "ଆରମ୍ଭ ଏବଂ ଶେଷ ତାରିଖ କ’ଣ ଥିଲା?",
    "ଆପଣଙ୍କର ମୁଖ୍ୟ ଦାୟିତ୍ୱଗୁଡ଼ିକୁ ତାଲିକାଭୁକ୍ତ କରନ୍ତୁ, କମା ଦ୍ୱାରା ପୃଥକ କରନ୍ତୁ।",
    "ଅନ୍ୟ ଏକ ପ୍ରମାଣପତ୍ର କିମ୍ବା ତାଲିମର ନାମ କ’ଣ? (ଛାଡିବାକୁ \"skip\" ଟାଇପ୍ କରନ୍ତୁ)",
    "ଏହି ପ୍ରମାଣପତ୍ର କିଏ ଜାରି କଲା?",
    "ଆପଣ ଏହାକୁ କେବେ ଗ୍ରହଣ କଲେ?",
    "ଅନ୍ୟ କୌଣସି ପ୍ରମାଣପତ୍ର? (ଛାଡିବାକୁ \"skip\" ଟାଇପ୍ କରନ୍ତୁ)",
    "ଏହି ପ୍ରମାଣପତ୍ର କିଏ ଜାରି କଲା?",
    "ଆପଣ ଏହାକୁ କେବେ ଗ୍ରହଣ କଲେ?",
    "ଆପଣଙ୍କର ସର୍ବୋଚ୍ଚ ଯୋଗ୍ୟତା କ’ଣ? (ଯେପରିକି, \"ଦଶମ ପାସ୍\", \"ଆଇଟିଆଇ ଫିଟର୍\")",
    "ଆପଣଙ୍କ ସ୍କୁଲ୍ କିମ୍ବା ଅନୁଷ୍ଠାନର ନାମ କ’ଣ?",
    "ଏହା କେଉଁଠାରେ ଅବସ୍ଥିତ ଥିଲା?",
    "ଆପଣ ଏହାକୁ କେଉଁ ବର୍ଷ ସମାପ୍ତ କଲେ?",
    "ଅନ୍ୟ କୌଣସି ଯୋଗ୍ୟତା? (ଛାଡିବାକୁ \"skip\" ଟାଇପ୍ କରନ୍ତୁ)",
    "ଆପଣଙ୍କ ସ୍କୁଲ୍ କିମ୍ବା ଅନୁଷ୍ଠାନର ନାମ କ’ଣ?",
    "ଏହା କେଉଁଠାରେ ଅବସ୍ଥିତ ଥିଲା?",
    "ଆପଣ ଏହାକୁ କେଉଁ ବର୍ଷ ସମାପ୍ତ କଲେ?",
    "ଆପଣଙ୍କର ସୁରକ୍ଷା ରେକର୍ଡ ବର୍ଣ୍ଣନା କରନ୍ତୁ (ଯେପରିକି, \"5 ବର୍ଷ ଧରି ଦୁର୍ଘଟଣାମୁକ୍ତ\")",
    "କୌଣସି ପୁରସ୍କାର କିମ୍ବା ସଫଳତା ତାଲିକାଭୁକ୍ତ କରନ୍ତୁ, କମା ଦ୍ୱାରା ପୃଥକ କରନ୍ତୁ।",
];
