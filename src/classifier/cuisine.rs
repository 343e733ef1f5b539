/// Keyword fragments looked up inside the predicted class label, in match
/// priority order. The first keyword contained in the label wins.
const KEYWORD_CUISINES: &[(&str, &str)] = &[
    ("pizza", "Pizza"),
    ("sushi", "Japanese"),
    ("ice cream", "Desserts"),
    ("burger", "American"),
    ("pasta", "Italian"),
    ("taco", "Mexican"),
    ("noodle", "Chinese"),
    ("rice", "Asian"),
    ("salad", "Healthy"),
    ("sandwich", "Fast Food"),
    ("cake", "Desserts"),
    ("bread", "Bakery"),
    ("coffee", "Cafe"),
    ("tea", "Cafe"),
    ("chocolate", "Desserts"),
    ("cookie", "Desserts"),
    ("donut", "Desserts"),
    ("french fries", "Fast Food"),
    ("hot dog", "Fast Food"),
    ("meat", "BBQ"),
    ("chicken", "BBQ"),
    ("fish", "Seafood"),
    ("shrimp", "Seafood"),
    ("crab", "Seafood"),
    ("lobster", "Seafood"),
    ("vegetable", "Vegetarian"),
    ("fruit", "Healthy"),
    ("apple", "Healthy"),
    ("orange", "Healthy"),
    ("banana", "Healthy"),
    ("strawberry", "Healthy"),
    ("grape", "Healthy"),
    ("watermelon", "Healthy"),
    ("pineapple", "Healthy"),
    ("mango", "Healthy"),
    ("peach", "Healthy"),
    ("pear", "Healthy"),
    ("cherry", "Healthy"),
    ("lemon", "Healthy"),
    ("lime", "Healthy"),
    ("coconut", "Healthy"),
    ("kiwi", "Healthy"),
    ("melon", "Healthy"),
    ("blueberry", "Healthy"),
    ("raspberry", "Healthy"),
    ("blackberry", "Healthy"),
    ("cranberry", "Healthy"),
    ("pomegranate", "Healthy"),
    ("fig", "Healthy"),
    ("date", "Healthy"),
    ("prune", "Healthy"),
    ("raisin", "Healthy"),
    ("currant", "Healthy"),
    ("apricot", "Healthy"),
    ("plum", "Healthy"),
    ("nectarine", "Healthy"),
    ("persimmon", "Healthy"),
    ("guava", "Healthy"),
    ("papaya", "Healthy"),
    ("passion fruit", "Healthy"),
    ("dragon fruit", "Healthy"),
    ("star fruit", "Healthy"),
    ("jackfruit", "Healthy"),
    ("durian", "Healthy"),
    ("lychee", "Healthy"),
    ("rambutan", "Healthy"),
    ("mangosteen", "Healthy"),
    ("longan", "Healthy"),
    ("loquat", "Healthy"),
    ("kumquat", "Healthy"),
    ("tangerine", "Healthy"),
    ("clementine", "Healthy"),
    ("mandarin", "Healthy"),
    ("grapefruit", "Healthy"),
    ("pomelo", "Healthy"),
];

/// Map a predicted class label to a cuisine name. Matching is
/// case-insensitive and works on substrings, so "cheeseburger" maps the
/// same way "burger" does.
pub fn match_cuisine(label: &str) -> Option<&'static str> {
    let label = label.to_lowercase();
    KEYWORD_CUISINES
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, cuisine)| *cuisine)
}
