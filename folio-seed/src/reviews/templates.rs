//! Fixed text pools for synthetic reviewers and review comments

/// Comment templates for 5-star reviews
pub const FIVE_STAR: &[&str] = &[
    "Absolutely brilliant! This book exceeded all my expectations. The author's writing style \
     is engaging and the content is incredibly insightful. Highly recommend to anyone \
     interested in this subject.",
    "One of the best books I've read this year. The depth of research and clarity of \
     explanation make complex topics accessible. A must-read!",
    "Outstanding work! Every page offers valuable insights. The practical examples and clear \
     explanations make this an essential resource.",
    "Exceptional quality throughout. The author demonstrates deep expertise while remaining \
     accessible to readers. Cannot recommend this highly enough.",
    "This book is a masterpiece. Comprehensive coverage, excellent writing, and practical \
     applications. Worth every penny.",
    "Phenomenal read! The content is well-organized, thoroughly researched, and presented in \
     an engaging manner. Five stars without hesitation.",
    "Simply amazing. This book transformed my understanding of the subject. The author's \
     expertise shines through on every page.",
    "A true gem! The insights provided are invaluable and the writing is crisp and clear. \
     This belongs on every serious reader's shelf.",
];

pub const FOUR_STAR: &[&str] = &[
    "Really enjoyed this book. Well-written and informative, though some sections could have \
     been more concise. Overall, highly recommended.",
    "Solid resource with good coverage of the topic. A few areas could be expanded, but \
     generally an excellent read.",
    "Very good book that delivers on its promises. The examples are helpful and the content \
     is relevant. Minor quibbles aside, well worth reading.",
    "Impressive work overall. Some chapters are stronger than others, but the quality is \
     consistently good throughout.",
    "A strong addition to the literature. Clear writing and useful insights, with only minor \
     room for improvement.",
    "Great book with plenty of valuable content. Occasionally dense but generally accessible \
     and worthwhile.",
    "Well-researched and thoughtfully presented. A few sections felt repetitive, but overall \
     an excellent resource.",
];

pub const THREE_STAR: &[&str] = &[
    "Decent book with some good insights, although it covers familiar ground in places. Worth \
     reading for specific sections.",
    "A mixed bag. Some parts are excellent, others feel rushed. Still valuable for those \
     interested in the topic.",
    "Reasonable introduction to the subject. Not groundbreaking, but competent and accessible.",
    "Meets expectations. The content is solid if unremarkable. Good for beginners but \
     experienced readers may want more depth.",
    "Fair coverage of the topic. Some sections shine while others could use more development. \
     A respectable effort.",
    "Average quality overall. Has its moments but doesn't stand out from similar books in the \
     field.",
];

pub const TWO_STAR: &[&str] = &[
    "Disappointing. The book promised more than it delivered. Some useful information but too \
     much filler content.",
    "Below expectations. The writing is uneven and the organization could be much better. \
     Only recommended with reservations.",
    "Not particularly impressive. Repetitive in places and lacking depth in others. There are \
     better alternatives available.",
    "Underwhelming read. While not without merit, the book fails to deliver on its ambitious \
     scope.",
];

pub const ONE_STAR: &[&str] = &[
    "Unfortunately not worth the time. The content is poorly organized and lacks depth. Would \
     not recommend.",
    "Very disappointing. Expected much more based on the description. Save your money and \
     look elsewhere.",
];

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda",
    "William", "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Thomas", "Sarah", "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa",
    "Matthew", "Betty", "Anthony", "Margaret", "Mark", "Sandra", "Donald", "Ashley",
    "Steven", "Kimberly", "Paul", "Emily", "Andrew", "Donna", "Joshua", "Michelle",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
    "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young",
];

/// Template pool for a star rating; out-of-range ratings use the 3-star pool
pub fn templates_for(rating: u8) -> &'static [&'static str] {
    match rating {
        5 => FIVE_STAR,
        4 => FOUR_STAR,
        3 => THREE_STAR,
        2 => TWO_STAR,
        1 => ONE_STAR,
        _ => THREE_STAR,
    }
}
