/// Category files fall into when no extension matches
pub const DEFAULT_CATEGORY: &str = "Others";

/// Flat staging folder used by the unpack action
pub const UNPACKED_FOLDER: &str = "Unpacked";

/// Prefix of the folders created by the cluster action (`Cluster_0`, `Cluster_1`, ...)
pub const CLUSTER_FOLDER_PREFIX: &str = "Cluster_";

/// Number of k-means clusters when the config does not say otherwise
pub const DEFAULT_CLUSTER_COUNT: usize = 3;

pub const DEFAULT_KMEANS_ITERATIONS: usize = 50;

/// Independent k-means runs; the one with the lowest inertia is kept
pub const KMEANS_RESTARTS: usize = 10;

/// Share of the training set held out to report classifier accuracy
pub const DEFAULT_TEST_FRACTION: f32 = 0.25;

pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Extension of the plain-text files fed to clustering and prediction
pub const TEXT_EXTENSION: &str = "txt";

/// File extensions for image types
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];

/// File extensions for document types
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "pdf", "docx", "txt", "xlsx", "pptx"];

/// File extensions for video types
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov"];

/// File extensions for audio types
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "flac"];

/// File extensions for archive types
pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar"];

/// File extensions for source code
pub const CODE_EXTENSIONS: &[&str] = &["py", "c", "cpp", "java"];

/// File extensions for executables
pub const EXECUTABLE_EXTENSIONS: &[&str] = &["exe"];

/// Built-in category table, in match order
pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    ("Images", IMAGE_EXTENSIONS),
    ("Documents", DOCUMENT_EXTENSIONS),
    ("Videos", VIDEO_EXTENSIONS),
    ("Music", AUDIO_EXTENSIONS),
    ("Archives", ARCHIVE_EXTENSIONS),
    ("Code", CODE_EXTENSIONS),
    ("Executables", EXECUTABLE_EXTENSIONS),
];

/// Image formats accepted by the OCR action
pub const OCR_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Training sentences for the category predictor: (text, category)
pub const TRAINING_EXAMPLES: &[(&str, &str)] = &[
    ("budget report", "Documents"),
    ("holiday photo", "Images"),
    ("project plan", "Documents"),
    ("beach video", "Videos"),
];

/// English stop words dropped before TF-IDF weighting
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
    "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
    "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];
