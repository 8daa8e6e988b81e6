// Rocket path parameters for the backend routes
use rocket::request::FromParam;

use crate::models::{Team, UnknownTeam, VoteFilter};

impl<'a> FromParam<'a> for Team {
    type Error = UnknownTeam;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse()
    }
}

impl<'a> FromParam<'a> for VoteFilter {
    type Error = UnknownTeam;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse()
    }
}
