pub const CONTAINER: &str = "min-h-screen bg-gray-50 dark:bg-gray-900 w-full px-4 sm:px-6 lg:px-8";
pub const CONTAINER_LG: &str = "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6 bg-gray-50 dark:bg-gray-900";
pub const NAV: &str = "fixed top-0 z-50 w-full bg-white/60 dark:bg-gray-700/60 backdrop-blur-md border-b border-gray-200/50 dark:border-gray-700/50";
pub const NAV_INNER: &str = "w-full h-16 px-4 sm:px-6 lg:px-8";
pub const NAV_CONTENT: &str = "h-full flex items-center justify-between";
pub const NAV_BRAND: &str = "flex items-center text-xl font-bold text-gray-900 dark:text-white hover:text-amber-500 dark:hover:text-amber-400 transition-colors duration-200";
pub const NAV_ITEMS: &str = "flex items-center space-x-4";
pub const NAV_LINK: &str = "relative px-3 py-2 text-sm font-medium text-gray-700 dark:text-gray-300 hover:text-amber-500 dark:hover:text-amber-400 transition-all duration-200";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6";
pub const CARD_HOVER: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] hover:shadow-xl p-6 transform hover:-translate-y-1 transition-all duration-300 cursor-pointer";
pub const CARD_ERROR: &str = "bg-red-50 dark:bg-red-900/50 border border-red-200 dark:border-red-800 rounded-lg p-4 text-red-700 dark:text-red-200";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-amber-500 to-orange-600 hover:from-amber-600 hover:to-orange-700 shadow-lg hover:shadow-xl transition-all duration-300";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800";
pub const TEXT_H1: &str = "text-3xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H2: &str = "text-2xl font-bold text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "text-gray-600 dark:text-gray-300";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const LOADING_SPINNER: &str = "animate-spin h-5 w-5 text-amber-500 dark:text-amber-400";

/// Rarity accent borders for item cards, keyed off `Rarity::as_str`.
pub fn rarity_border(rarity: &str) -> &'static str {
    match rarity {
        "legendary" => "border-amber-400",
        "epic" => "border-violet-500",
        "rare" => "border-blue-500",
        "uncommon" => "border-emerald-500",
        _ => "border-gray-400 dark:border-gray-600",
    }
}
